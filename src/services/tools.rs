//! Tool management service

use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::{
        tool::{CreateTool, Tool, ToolQuery, ToolWithStatus, UpdateTool},
        Booking, Maintenance,
    },
    repository::Repository,
};

use super::availability;

#[derive(Clone)]
pub struct ToolsService {
    repository: Repository,
}

impl ToolsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List tools, each with its derived status and active booking
    pub async fn list(&self, query: &ToolQuery) -> AppResult<Vec<ToolWithStatus>> {
        let tools = self.repository.tools.list(query).await?;
        if tools.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = tools.iter().map(|t| t.id).collect();
        let bookings = self.repository.bookings.list_for_tools(&ids).await?;
        let maintenances = self.repository.maintenances.list_for_tools(&ids).await?;

        let mut bookings_by_tool: HashMap<i32, Vec<Booking>> = HashMap::new();
        for b in bookings {
            bookings_by_tool.entry(b.tool_id).or_default().push(b);
        }
        let mut maintenances_by_tool: HashMap<i32, Vec<Maintenance>> = HashMap::new();
        for m in maintenances {
            maintenances_by_tool.entry(m.tool_id).or_default().push(m);
        }

        let empty_bookings: Vec<Booking> = Vec::new();
        let empty_maintenances: Vec<Maintenance> = Vec::new();

        Ok(tools
            .into_iter()
            .map(|tool| {
                let bookings = bookings_by_tool.get(&tool.id).unwrap_or(&empty_bookings);
                let maintenances = maintenances_by_tool
                    .get(&tool.id)
                    .unwrap_or(&empty_maintenances);
                ToolWithStatus {
                    status: availability::resolve_status(bookings, maintenances),
                    active_booking: availability::active_booking_id(bookings),
                    tool,
                }
            })
            .collect())
    }

    /// Get one tool with its derived status
    pub async fn get_by_id(&self, id: i32) -> AppResult<ToolWithStatus> {
        let tool = self.repository.tools.get_by_id(id).await?;
        let bookings = self.repository.bookings.list_for_tool(id).await?;
        let maintenances = self.repository.maintenances.list_for_tool(id).await?;

        Ok(ToolWithStatus {
            status: availability::resolve_status(&bookings, &maintenances),
            active_booking: availability::active_booking_id(&bookings),
            tool,
        })
    }

    pub async fn create(&self, data: &CreateTool) -> AppResult<Tool> {
        if let Some(owner_id) = data.owner_id {
            self.repository.users.get_by_id(owner_id).await?;
        }
        self.repository.tools.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateTool) -> AppResult<Tool> {
        if let Some(owner_id) = data.owner_id {
            self.repository.users.get_by_id(owner_id).await?;
        }
        self.repository.tools.update(id, data).await
    }

    /// Delete a tool, refused while bookings still occupy its calendar
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let open = self.repository.bookings.count_blocking_for_tool(id).await?;
        if open > 0 {
            return Err(AppError::BusinessRule(format!(
                "Tool has {} open booking(s); cancel or complete them first",
                open
            )));
        }
        self.repository.tools.delete(id).await
    }
}
