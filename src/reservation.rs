// Reservation view-model state: the check-in/check-out bounds, the derived
// nights count, and the multi-step booking flow the reservation pages walk
// through (dates -> rooms -> guests -> review).

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::rooms::{GuestCounts, Room, RoomSelection};

#[derive(Error, Debug, PartialEq)]
pub enum ReservationError {
    // A check-out on or before check-in is rejected outright, never swapped
    #[error("Check-out {check_out} must be after check-in {check_in}")]
    CheckOutNotAfterCheckIn {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("Both a check-in and a check-out date are required")]
    MissingDates,

    #[error("At least one room must be selected")]
    NoRoomsSelected,

    #[error("At least one guest is required")]
    NoGuests,

    #[error("{guests} guests exceed the selected rooms' capacity of {capacity}")]
    OverCapacity { guests: u32, capacity: u32 },
}

// The two boundary dates of a stay. Invariant: when both are set,
// check_out > check_in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateSelection {
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
}

impl DateSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check_in(&self) -> Option<NaiveDate> {
        self.check_in
    }

    pub fn check_out(&self) -> Option<NaiveDate> {
        self.check_out
    }

    pub fn set_check_in(&mut self, date: NaiveDate) -> Result<(), ReservationError> {
        if let Some(check_out) = self.check_out {
            if date >= check_out {
                return Err(ReservationError::CheckOutNotAfterCheckIn {
                    check_in: date,
                    check_out,
                });
            }
        }
        self.check_in = Some(date);
        Ok(())
    }

    pub fn set_check_out(&mut self, date: NaiveDate) -> Result<(), ReservationError> {
        if let Some(check_in) = self.check_in {
            if date <= check_in {
                return Err(ReservationError::CheckOutNotAfterCheckIn {
                    check_in,
                    check_out: date,
                });
            }
        }
        self.check_out = Some(date);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.check_in = None;
        self.check_out = None;
    }

    pub fn is_complete(&self) -> bool {
        self.check_in.is_some() && self.check_out.is_some()
    }

    // Whole days between the bounds; 0 when either bound is absent
    pub fn nights(&self) -> u32 {
        match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) => {
                u32::try_from(check_out.signed_duration_since(check_in).num_days()).unwrap_or(0)
            }
            _ => 0,
        }
    }
}

// Steps of the booking flow, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStep {
    Dates,
    Rooms,
    Guests,
    Review,
}

// Price summary shown on the review step
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub nights: u32,
    pub per_night: f64,
    pub total: f64,
    pub currency: Option<String>,
}

// The multi-step reservation flow. Forward transitions are guarded: the
// current step must validate before advancing. Going back keeps everything
// already entered.
#[derive(Debug, Clone, Default)]
pub struct ReservationFlow {
    step_index: usize,
    pub dates: DateSelection,
    pub rooms: RoomSelection,
    pub guests: GuestCounts,
}

const STEPS: [FlowStep; 4] = [
    FlowStep::Dates,
    FlowStep::Rooms,
    FlowStep::Guests,
    FlowStep::Review,
];

impl ReservationFlow {
    pub fn new(catalog: Vec<Room>) -> Self {
        Self {
            step_index: 0,
            dates: DateSelection::new(),
            rooms: RoomSelection::new(catalog),
            guests: GuestCounts::standard(),
        }
    }

    pub fn step(&self) -> FlowStep {
        STEPS[self.step_index]
    }

    pub fn validate_step(&self) -> Result<(), ReservationError> {
        match self.step() {
            FlowStep::Dates => {
                if !self.dates.is_complete() {
                    return Err(ReservationError::MissingDates);
                }
                Ok(())
            }
            FlowStep::Rooms => {
                if self.rooms.selected_ids().is_empty() {
                    return Err(ReservationError::NoRoomsSelected);
                }
                Ok(())
            }
            FlowStep::Guests => {
                if !self.guests.is_valid() {
                    return Err(ReservationError::NoGuests);
                }
                let guests = self.guests.total();
                let capacity = self.rooms.capacity();
                if guests > capacity {
                    return Err(ReservationError::OverCapacity { guests, capacity });
                }
                Ok(())
            }
            FlowStep::Review => Ok(()),
        }
    }

    // Moves to the next step if the current one validates; staying on
    // Review is a no-op.
    pub fn advance(&mut self) -> Result<FlowStep, ReservationError> {
        self.validate_step()?;
        if self.step_index + 1 < STEPS.len() {
            self.step_index += 1;
            debug!(step = ?self.step(), "reservation flow advanced");
        }
        Ok(self.step())
    }

    // Going back never loses entered data and never fails
    pub fn back(&mut self) -> FlowStep {
        self.step_index = self.step_index.saturating_sub(1);
        self.step()
    }

    pub fn quote(&self) -> Quote {
        let nights = self.dates.nights();
        let per_night = self.rooms.total_price();
        Quote {
            nights,
            per_night,
            total: per_night * f64::from(nights),
            currency: self.rooms.currency().map(str::to_string),
        }
    }
}
