// src/services/schedule_service.rs
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing;

use crate::models::{booking::Booking, technician::Technician};

#[derive(Debug, Clone, Serialize)]
pub struct TechnicianSchedule<'a> {
    pub technician: &'a Technician,
    pub bookings: Vec<&'a Booking>,
}

/// One calendar day of bookings laid out per technician, in roster order.
#[derive(Debug, Clone, Serialize)]
pub struct DaySchedule<'a> {
    pub date: NaiveDate,
    pub technicians: Vec<TechnicianSchedule<'a>>,
    pub unassigned: Vec<&'a Booking>,
    /// Bookings whose technician is not on the roster.
    pub unrostered: Vec<&'a Booking>,
}

impl<'a> DaySchedule<'a> {
    /// Number of technician buckets, empty ones included.
    pub fn len(&self) -> usize {
        self.technicians.len()
    }

    pub fn is_empty(&self) -> bool {
        self.technicians.is_empty()
    }

    pub fn bucket(&self, technician_id: u64) -> Option<&[&'a Booking]> {
        self.technicians
            .iter()
            .find(|slot| slot.technician.id == technician_id)
            .map(|slot| slot.bookings.as_slice())
    }

    pub fn by_technician(&self) -> BTreeMap<u64, Vec<&'a Booking>> {
        self.technicians
            .iter()
            .map(|slot| (slot.technician.id, slot.bookings.clone()))
            .collect()
    }

    pub fn total_bookings(&self) -> usize {
        self.technicians.iter().map(|slot| slot.bookings.len()).sum::<usize>()
            + self.unassigned.len()
            + self.unrostered.len()
    }

    /// Nothing booked for anyone that day.
    pub fn is_free_day(&self) -> bool {
        self.total_bookings() == 0
    }
}

/// Groups the bookings that fall on `selected` under their technician.
///
/// A booking's `technician_id` wins when present; otherwise its display name is
/// matched against the roster. Each bucket is ordered by start time, with ties
/// kept in input order.
pub fn reconcile<'a>(
    bookings: &'a [Booking],
    selected: NaiveDate,
    roster: &'a [Technician],
) -> DaySchedule<'a> {
    let mut technicians: Vec<TechnicianSchedule<'a>> = Vec::with_capacity(roster.len());
    let mut slot_by_id: HashMap<u64, usize> = HashMap::with_capacity(roster.len());

    for technician in roster {
        if slot_by_id.contains_key(&technician.id) {
            tracing::warn!("Duplicate technician id {} in roster, keeping the first", technician.id);
            continue;
        }
        slot_by_id.insert(technician.id, technicians.len());
        technicians.push(TechnicianSchedule {
            technician,
            bookings: Vec::new(),
        });
    }

    let mut unassigned = Vec::new();
    let mut unrostered = Vec::new();

    for booking in bookings.iter().filter(|b| b.scheduled_date == selected) {
        if booking.is_unassigned() {
            unassigned.push(booking);
            continue;
        }

        let slot = match (booking.technician_id, booking.technician.as_deref()) {
            (Some(id), _) => slot_by_id.get(&id).copied(),
            (None, Some(name)) => technicians
                .iter()
                .position(|slot| slot.technician.answers_to(name)),
            (None, None) => None,
        };

        match slot {
            Some(index) => technicians[index].bookings.push(booking),
            None => unrostered.push(booking),
        }
    }

    for slot in &mut technicians {
        slot.bookings.sort_by_key(|b| b.scheduled_time);
    }
    unassigned.sort_by_key(|b| b.scheduled_time);
    unrostered.sort_by_key(|b| b.scheduled_time);

    tracing::debug!(
        "Schedule for {}: {} technicians, {} unassigned, {} unrostered",
        selected,
        technicians.len(),
        unassigned.len(),
        unrostered.len()
    );

    DaySchedule {
        date: selected,
        technicians,
        unassigned,
        unrostered,
    }
}

/// Same as [`reconcile`], ignoring the time of day of `selected`.
pub fn reconcile_at<'a>(
    bookings: &'a [Booking],
    selected: NaiveDateTime,
    roster: &'a [Technician],
) -> DaySchedule<'a> {
    reconcile(bookings, selected.date(), roster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, d).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn roster() -> Vec<Technician> {
        vec![Technician::new(1, "Andi", "andi"), Technician::new(2, "Rina", "rina")]
    }

    fn booking(id: u64, date: NaiveDate, time: NaiveTime) -> Booking {
        Booking::new(id, format!("Pelanggan {}", id), "0812", "Servis AC", date, time)
    }

    #[test]
    fn test_empty_bookings_keep_every_technician() {
        let roster = roster();
        let schedule = reconcile(&[], day(5), &roster);
        assert_eq!(schedule.len(), 2);
        assert!(schedule.bucket(1).unwrap().is_empty());
        assert!(schedule.bucket(2).unwrap().is_empty());
        assert!(schedule.is_free_day());
        assert_eq!(schedule.by_technician().len(), 2);
    }

    #[test]
    fn test_filters_by_calendar_day() {
        let roster = roster();
        let bookings = vec![
            booking(1, day(5), at(23, 59)).with_technician("Andi"),
            booking(2, day(6), at(0, 0)).with_technician("Andi"),
            booking(3, day(4), at(23, 59)).with_technician("Andi"),
        ];

        let midnight = day(5).and_hms_opt(0, 0, 0).unwrap();
        let schedule = reconcile_at(&bookings, midnight, &roster);
        let ids: Vec<u64> = schedule.bucket(1).unwrap().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1]);
        assert_eq!(schedule.total_bookings(), 1);
    }

    #[test]
    fn test_groups_and_orders_by_time() {
        let roster = roster();
        let bookings = vec![
            booking(1, day(5), at(15, 0)).with_technician("Andi"),
            booking(2, day(5), at(9, 0)).with_technician("rina"),
            booking(3, day(5), at(8, 0)).with_technician("Andi"),
            booking(4, day(5), at(10, 0)),
            booking(5, day(5), at(11, 0)).with_technician("Bayu"),
        ];

        let schedule = reconcile(&bookings, day(5), &roster);
        let andi: Vec<u64> = schedule.bucket(1).unwrap().iter().map(|b| b.id).collect();
        let rina: Vec<u64> = schedule.bucket(2).unwrap().iter().map(|b| b.id).collect();
        assert_eq!(andi, vec![3, 1]);
        assert_eq!(rina, vec![2]);
        assert_eq!(schedule.unassigned.iter().map(|b| b.id).collect::<Vec<_>>(), vec![4]);
        assert_eq!(schedule.unrostered.iter().map(|b| b.id).collect::<Vec<_>>(), vec![5]);
        assert_eq!(schedule.total_bookings(), 5);
    }

    #[test]
    fn test_same_time_keeps_input_order() {
        let roster = roster();
        let bookings = vec![
            booking(7, day(5), at(10, 0)).with_technician("Andi"),
            booking(3, day(5), at(9, 0)).with_technician("Andi"),
            booking(5, day(5), at(10, 0)).with_technician("Andi"),
            booking(1, day(5), at(10, 0)).with_technician("Andi"),
        ];

        let schedule = reconcile(&bookings, day(5), &roster);
        let ids: Vec<u64> = schedule.bucket(1).unwrap().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![3, 7, 5, 1]);

        let times: Vec<NaiveTime> = schedule.bucket(1).unwrap().iter().map(|b| b.scheduled_time).collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_technician_id_takes_precedence_over_name() {
        let roster = roster();
        let bookings = vec![
            booking(1, day(5), at(9, 0)).with_technician("Andi").with_technician_id(2),
            booking(2, day(5), at(9, 0)).with_technician_id(99),
        ];

        let schedule = reconcile(&bookings, day(5), &roster);
        assert!(schedule.bucket(1).unwrap().is_empty());
        assert_eq!(schedule.bucket(2).unwrap()[0].id, 1);
        assert_eq!(schedule.unrostered[0].id, 2);
    }

    #[test]
    fn test_duplicate_roster_entry_collapses() {
        let mut roster = roster();
        roster.push(Technician::new(1, "Andi (lama)", "andi2"));

        let schedule = reconcile(&[], day(5), &roster);
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.technicians[0].technician.name, "Andi");
    }
}
