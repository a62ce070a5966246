//! Tool availability and booking conflict logic
//!
//! Pure functions over records already fetched from the store. The
//! resolver and the conflict checker never touch the database, so every
//! rule here is unit-testable without a running server.

use chrono::{DateTime, Duration, Utc};

use crate::models::{
    Booking, BookingStatus, Maintenance, MaintenanceStatus, ToolStatus,
};

/// Half-open interval intersection: `[a_start, a_end)` and `[b_start, b_end)`
/// overlap iff `a_start < b_end && a_end > b_start`. Touching endpoints do
/// not overlap, so a booking may begin exactly when another ends.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Effective window of a maintenance. An open-ended maintenance collapses
/// to the degenerate instant `[start, start)`.
fn maintenance_window(m: &Maintenance) -> (DateTime<Utc>, DateTime<Utc>) {
    (m.start_date, m.end_date.unwrap_or(m.start_date))
}

/// Derive a tool's availability from its associated records.
///
/// Ordered rules, first match wins. The resolver inspects status flags
/// only, never dates: a tool with a far-future pending booking reports
/// `booked` today. That is the intended reserve-ahead policy.
pub fn resolve_status(bookings: &[Booking], maintenances: &[Maintenance]) -> ToolStatus {
    if maintenances
        .iter()
        .any(|m| m.status == MaintenanceStatus::InProgress)
    {
        return ToolStatus::InMaintenance;
    }
    if bookings.iter().any(|b| b.status == BookingStatus::Active) {
        return ToolStatus::InUse;
    }
    if bookings
        .iter()
        .any(|b| matches!(b.status, BookingStatus::Approved | BookingStatus::Pending))
    {
        return ToolStatus::Booked;
    }
    if maintenances
        .iter()
        .any(|m| m.status == MaintenanceStatus::Scheduled)
    {
        return ToolStatus::InMaintenance;
    }
    ToolStatus::Available
}

/// Id of the currently-active booking, if any.
pub fn active_booking_id(bookings: &[Booking]) -> Option<i32> {
    bookings
        .iter()
        .find(|b| b.status == BookingStatus::Active)
        .map(|b| b.id)
}

/// A collision between a requested interval and an existing record.
#[derive(Debug)]
pub enum Conflict<'a> {
    Booking(&'a Booking),
    Maintenance(&'a Maintenance),
}

/// Check a requested `[start, end)` interval against a tool's records.
///
/// Bookings participate while their status is pending, approved or active;
/// rejected, completed and cancelled bookings never block. Maintenances
/// participate in every status except completed. Booking collisions are
/// reported ahead of maintenance collisions.
///
/// Callers must have validated `start < end` already.
pub fn find_conflict<'a>(
    bookings: &'a [Booking],
    maintenances: &'a [Maintenance],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Option<Conflict<'a>> {
    if let Some(b) = bookings
        .iter()
        .filter(|b| b.status.blocks_interval())
        .find(|b| overlaps(start, end, b.start_date, b.end_date))
    {
        return Some(Conflict::Booking(b));
    }

    if let Some(m) = maintenances
        .iter()
        .filter(|m| !m.status.is_terminal())
        .find(|m| {
            let (m_start, m_end) = maintenance_window(m);
            overlaps(start, end, m_start, m_end)
        })
    {
        return Some(Conflict::Maintenance(m));
    }

    None
}

/// Width of the instant window used by the direct-checkout path.
const CHECKOUT_EPSILON_SECS: i64 = 1;

/// Conflict check for direct checkout, with no booking record backing it.
///
/// A narrower, time-of-call variant of [`find_conflict`]: the requested
/// window is `[now, now + epsilon)`, and only bookings already granted
/// (approved or active) and maintenances already on the calendar
/// (scheduled or in progress) are considered.
pub fn find_checkout_conflict<'a>(
    bookings: &'a [Booking],
    maintenances: &'a [Maintenance],
    now: DateTime<Utc>,
) -> Option<Conflict<'a>> {
    let end = now + Duration::seconds(CHECKOUT_EPSILON_SECS);

    if let Some(b) = bookings
        .iter()
        .filter(|b| matches!(b.status, BookingStatus::Approved | BookingStatus::Active))
        .find(|b| overlaps(now, end, b.start_date, b.end_date))
    {
        return Some(Conflict::Booking(b));
    }

    if let Some(m) = maintenances
        .iter()
        .filter(|m| {
            matches!(
                m.status,
                MaintenanceStatus::Scheduled | MaintenanceStatus::InProgress
            )
        })
        .find(|m| {
            let (m_start, m_end) = maintenance_window(m);
            overlaps(now, end, m_start, m_end)
        })
    {
        return Some(Conflict::Maintenance(m));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn d(month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, month, day, 0, 0, 0).unwrap()
    }

    fn booking(id: i32, status: BookingStatus, start: DateTime<Utc>, end: DateTime<Utc>) -> Booking {
        Booking {
            id,
            tool_id: 1,
            user_id: 1,
            start_date: start,
            end_date: end,
            status,
            notes: None,
            crea_date: d(1, 1),
            modif_date: None,
        }
    }

    fn maintenance(
        id: i32,
        status: MaintenanceStatus,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> Maintenance {
        Maintenance {
            id,
            tool_id: 1,
            description: "bearing swap".to_string(),
            cost: None,
            start_date: start,
            end_date: end,
            status,
            crea_date: d(1, 1),
            modif_date: None,
        }
    }

    // -- resolve_status -----------------------------------------------------

    #[test]
    fn no_records_is_available() {
        assert_eq!(resolve_status(&[], &[]), ToolStatus::Available);
    }

    #[test]
    fn in_progress_maintenance_wins_over_everything() {
        let bookings = vec![
            booking(1, BookingStatus::Active, d(1, 1), d(1, 5)),
            booking(2, BookingStatus::Pending, d(2, 1), d(2, 5)),
        ];
        let maints = vec![maintenance(1, MaintenanceStatus::InProgress, d(1, 2), None)];
        assert_eq!(resolve_status(&bookings, &maints), ToolStatus::InMaintenance);
    }

    #[test]
    fn active_booking_means_in_use() {
        let bookings = vec![
            booking(1, BookingStatus::Active, d(1, 1), d(1, 5)),
            booking(2, BookingStatus::Approved, d(2, 1), d(2, 5)),
        ];
        let maints = vec![maintenance(1, MaintenanceStatus::Scheduled, d(3, 1), Some(d(3, 2)))];
        assert_eq!(resolve_status(&bookings, &maints), ToolStatus::InUse);
    }

    #[test]
    fn pending_or_approved_booking_means_booked() {
        let pending = vec![booking(1, BookingStatus::Pending, d(6, 1), d(6, 5))];
        assert_eq!(resolve_status(&pending, &[]), ToolStatus::Booked);

        let approved = vec![booking(1, BookingStatus::Approved, d(6, 1), d(6, 5))];
        assert_eq!(resolve_status(&approved, &[]), ToolStatus::Booked);
    }

    #[test]
    fn far_future_pending_booking_still_reports_booked() {
        // The resolver is date-blind on purpose.
        let bookings = vec![booking(1, BookingStatus::Pending, d(12, 1), d(12, 15))];
        assert_eq!(resolve_status(&bookings, &[]), ToolStatus::Booked);
    }

    #[test]
    fn scheduled_maintenance_only_when_no_booking_claims_the_tool() {
        let maints = vec![maintenance(1, MaintenanceStatus::Scheduled, d(4, 1), Some(d(4, 3)))];
        assert_eq!(resolve_status(&[], &maints), ToolStatus::InMaintenance);

        // A pending booking outranks a scheduled maintenance.
        let bookings = vec![booking(1, BookingStatus::Pending, d(6, 1), d(6, 5))];
        assert_eq!(resolve_status(&bookings, &maints), ToolStatus::Booked);
    }

    #[test]
    fn terminal_records_leave_the_tool_available() {
        let bookings = vec![
            booking(1, BookingStatus::Completed, d(1, 1), d(1, 5)),
            booking(2, BookingStatus::Cancelled, d(2, 1), d(2, 5)),
            booking(3, BookingStatus::Rejected, d(3, 1), d(3, 5)),
        ];
        let maints = vec![maintenance(1, MaintenanceStatus::Completed, d(1, 2), Some(d(1, 3)))];
        assert_eq!(resolve_status(&bookings, &maints), ToolStatus::Available);
    }

    #[test]
    fn requested_maintenance_does_not_change_status() {
        // Requested maintenance blocks the calendar but not the status flag.
        let maints = vec![maintenance(1, MaintenanceStatus::Requested, d(4, 1), None)];
        assert_eq!(resolve_status(&[], &maints), ToolStatus::Available);
    }

    #[test]
    fn active_booking_id_found() {
        let bookings = vec![
            booking(7, BookingStatus::Completed, d(1, 1), d(1, 5)),
            booking(9, BookingStatus::Active, d(2, 1), d(2, 5)),
        ];
        assert_eq!(active_booking_id(&bookings), Some(9));
        assert_eq!(active_booking_id(&bookings[..1]), None);
    }

    // -- overlap rule -------------------------------------------------------

    #[test]
    fn overlap_is_half_open() {
        // [Jan 1, Jan 5) and [Jan 5, Jan 10) touch but do not overlap.
        assert!(!overlaps(d(1, 1), d(1, 5), d(1, 5), d(1, 10)));
        assert!(!overlaps(d(1, 5), d(1, 10), d(1, 1), d(1, 5)));
        // [Jan 1, Jan 5) and [Jan 4, Jan 10) overlap.
        assert!(overlaps(d(1, 1), d(1, 5), d(1, 4), d(1, 10)));
        assert!(overlaps(d(1, 4), d(1, 10), d(1, 1), d(1, 5)));
    }

    #[test]
    fn overlap_containment() {
        assert!(overlaps(d(1, 2), d(1, 3), d(1, 1), d(1, 10)));
        assert!(overlaps(d(1, 1), d(1, 10), d(1, 2), d(1, 3)));
    }

    // -- find_conflict ------------------------------------------------------

    #[test]
    fn approved_booking_conflicts_inside_its_window() {
        let bookings = vec![booking(1, BookingStatus::Approved, d(3, 1), d(3, 10))];
        match find_conflict(&bookings, &[], d(3, 5), d(3, 8)) {
            Some(Conflict::Booking(b)) => assert_eq!(b.id, 1),
            other => panic!("expected booking conflict, got {:?}", other),
        }
    }

    #[test]
    fn booking_starting_at_existing_end_is_accepted() {
        let bookings = vec![booking(1, BookingStatus::Approved, d(3, 1), d(3, 10))];
        assert!(find_conflict(&bookings, &[], d(3, 10), d(3, 15)).is_none());
    }

    #[test]
    fn terminal_bookings_never_conflict() {
        let bookings = vec![
            booking(1, BookingStatus::Cancelled, d(3, 1), d(3, 10)),
            booking(2, BookingStatus::Rejected, d(3, 1), d(3, 10)),
            booking(3, BookingStatus::Completed, d(3, 1), d(3, 10)),
        ];
        assert!(find_conflict(&bookings, &[], d(3, 5), d(3, 8)).is_none());
    }

    #[test]
    fn scheduled_maintenance_conflicts() {
        let maints = vec![maintenance(1, MaintenanceStatus::Scheduled, d(4, 1), Some(d(4, 3)))];
        match find_conflict(&[], &maints, d(4, 2), d(4, 4)) {
            Some(Conflict::Maintenance(m)) => assert_eq!(m.id, 1),
            other => panic!("expected maintenance conflict, got {:?}", other),
        }
    }

    #[test]
    fn completed_maintenance_never_conflicts() {
        let maints = vec![maintenance(1, MaintenanceStatus::Completed, d(4, 1), Some(d(4, 3)))];
        assert!(find_conflict(&[], &maints, d(4, 2), d(4, 4)).is_none());
    }

    #[test]
    fn requested_maintenance_still_blocks_the_calendar() {
        let maints = vec![maintenance(1, MaintenanceStatus::Requested, d(4, 1), Some(d(4, 3)))];
        assert!(find_conflict(&[], &maints, d(4, 2), d(4, 4)).is_some());
    }

    #[test]
    fn open_ended_maintenance_collapses_to_start_instant() {
        let maints = vec![maintenance(1, MaintenanceStatus::Scheduled, d(4, 3), None)];
        // Window strictly containing the start instant conflicts.
        assert!(find_conflict(&[], &maints, d(4, 2), d(4, 4)).is_some());
        // Window ending exactly at the start instant does not.
        assert!(find_conflict(&[], &maints, d(4, 1), d(4, 3)).is_none());
        // Window starting at the start instant does not either: [s, s) is empty.
        assert!(find_conflict(&[], &maints, d(4, 3), d(4, 5)).is_none());
    }

    #[test]
    fn booking_conflict_reported_before_maintenance_conflict() {
        let bookings = vec![booking(1, BookingStatus::Pending, d(5, 1), d(5, 10))];
        let maints = vec![maintenance(1, MaintenanceStatus::Scheduled, d(5, 1), Some(d(5, 10)))];
        assert!(matches!(
            find_conflict(&bookings, &maints, d(5, 2), d(5, 3)),
            Some(Conflict::Booking(_))
        ));
    }

    // -- find_checkout_conflict ---------------------------------------------

    #[test]
    fn checkout_blocked_by_current_approved_booking() {
        let now = d(6, 5);
        let bookings = vec![booking(1, BookingStatus::Approved, d(6, 1), d(6, 10))];
        assert!(matches!(
            find_checkout_conflict(&bookings, &[], now),
            Some(Conflict::Booking(_))
        ));
    }

    #[test]
    fn checkout_ignores_pending_bookings() {
        // Pending requests block new bookings but not a walk-up checkout.
        let now = d(6, 5);
        let bookings = vec![booking(1, BookingStatus::Pending, d(6, 1), d(6, 10))];
        assert!(find_checkout_conflict(&bookings, &[], now).is_none());
    }

    #[test]
    fn checkout_ignores_future_windows() {
        let now = d(6, 5);
        let bookings = vec![booking(1, BookingStatus::Approved, d(7, 1), d(7, 10))];
        let maints = vec![maintenance(1, MaintenanceStatus::Scheduled, d(8, 1), Some(d(8, 3)))];
        assert!(find_checkout_conflict(&bookings, &maints, now).is_none());
    }

    #[test]
    fn checkout_blocked_by_in_progress_maintenance() {
        let now = d(6, 5);
        let maints = vec![maintenance(1, MaintenanceStatus::InProgress, d(6, 1), Some(d(6, 10)))];
        assert!(matches!(
            find_checkout_conflict(&[], &maints, now),
            Some(Conflict::Maintenance(_))
        ));
    }

    #[test]
    fn checkout_ignores_requested_maintenance() {
        let now = d(6, 5);
        let maints = vec![maintenance(1, MaintenanceStatus::Requested, d(6, 1), Some(d(6, 10)))];
        assert!(find_checkout_conflict(&[], &maints, now).is_none());
    }
}
