// Room catalog, selected-room set and per-category guest counters for the
// bungalow reservation flow. All of this is view-model state owned by the
// page that hosts the flow.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoomError {
    #[error("Unknown room: {0}")]
    UnknownRoom(String),

    #[error("Room not available: {0}")]
    RoomUnavailable(String),
}

// A bookable room inside a bungalow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub max_occupancy: u32,
    pub price: f64,
    pub currency: String,
    pub is_available: bool,
}

// Order-preserving set of selected room ids over a fixed catalog.
// Uniqueness is guaranteed by toggle itself, so a Vec keeps insertion order.
#[derive(Debug, Clone, Default)]
pub struct RoomSelection {
    catalog: Vec<Room>,
    selected: Vec<String>,
}

impl RoomSelection {
    pub fn new(catalog: Vec<Room>) -> Self {
        Self {
            catalog,
            selected: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &[Room] {
        &self.catalog
    }

    pub fn selected_ids(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, room_id: &str) -> bool {
        self.selected.iter().any(|id| id == room_id)
    }

    // Adds the room id if absent, removes it if present. Returns whether the
    // room is selected after the call.
    pub fn toggle(&mut self, room_id: &str) -> Result<bool, RoomError> {
        let room = self
            .catalog
            .iter()
            .find(|r| r.id == room_id)
            .ok_or_else(|| RoomError::UnknownRoom(room_id.to_string()))?;

        if let Some(pos) = self.selected.iter().position(|id| id == room_id) {
            self.selected.remove(pos);
            return Ok(false);
        }

        if !room.is_available {
            return Err(RoomError::RoomUnavailable(room_id.to_string()));
        }

        self.selected.push(room_id.to_string());
        Ok(true)
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn selected_rooms(&self) -> impl Iterator<Item = &Room> {
        self.selected
            .iter()
            .filter_map(|id| self.catalog.iter().find(|r| &r.id == id))
    }

    // Sum of selected rooms' nightly prices
    pub fn total_price(&self) -> f64 {
        self.selected_rooms().map(|r| r.price).sum()
    }

    // Sum of selected rooms' maximum occupancies
    pub fn capacity(&self) -> u32 {
        self.selected_rooms().map(|r| r.max_occupancy).sum()
    }

    pub fn currency(&self) -> Option<&str> {
        self.selected_rooms().next().map(|r| r.currency.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeGroup {
    Adult,
    Child,
    Infant,
}

// One guest category shown as a +/- counter row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestCategory {
    pub id: String,
    pub label: String,
    pub age_group: AgeGroup,
}

#[derive(Debug, Clone, PartialEq)]
struct GuestCount {
    category: GuestCategory,
    count: u32,
}

// Per-category guest counts. Increment has no upper bound here (capacity is
// checked at the flow level); decrement floors at zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuestCounts {
    counts: Vec<GuestCount>,
}

impl GuestCounts {
    pub fn new(categories: Vec<GuestCategory>) -> Self {
        Self {
            counts: categories
                .into_iter()
                .map(|category| GuestCount { category, count: 0 })
                .collect(),
        }
    }

    // The category set the reservation pages start from
    pub fn standard() -> Self {
        Self::new(vec![
            GuestCategory {
                id: "adults".to_string(),
                label: "Adults".to_string(),
                age_group: AgeGroup::Adult,
            },
            GuestCategory {
                id: "children".to_string(),
                label: "Children (3-17)".to_string(),
                age_group: AgeGroup::Child,
            },
            GuestCategory {
                id: "infants".to_string(),
                label: "Infants (0-2)".to_string(),
                age_group: AgeGroup::Infant,
            },
        ])
    }

    pub fn increment(&mut self, category_id: &str) -> Option<u32> {
        self.counts
            .iter_mut()
            .find(|c| c.category.id == category_id)
            .map(|c| {
                c.count += 1;
                c.count
            })
    }

    pub fn decrement(&mut self, category_id: &str) -> Option<u32> {
        self.counts
            .iter_mut()
            .find(|c| c.category.id == category_id)
            .map(|c| {
                c.count = c.count.saturating_sub(1);
                c.count
            })
    }

    pub fn count(&self, category_id: &str) -> Option<u32> {
        self.counts
            .iter()
            .find(|c| c.category.id == category_id)
            .map(|c| c.count)
    }

    pub fn categories(&self) -> impl Iterator<Item = (&GuestCategory, u32)> {
        self.counts.iter().map(|c| (&c.category, c.count))
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().map(|c| c.count).sum()
    }

    // A reservation needs at least one guest to proceed
    pub fn is_valid(&self) -> bool {
        self.total() >= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Vec<Room> {
        vec![
            Room {
                id: "std-double".to_string(),
                name: "Standard Double".to_string(),
                max_occupancy: 2,
                price: 120.0,
                currency: "EUR".to_string(),
                is_available: true,
            },
            Room {
                id: "family".to_string(),
                name: "Family Room".to_string(),
                max_occupancy: 4,
                price: 210.0,
                currency: "EUR".to_string(),
                is_available: true,
            },
            Room {
                id: "lakeview".to_string(),
                name: "Lakeview Suite".to_string(),
                max_occupancy: 3,
                price: 280.0,
                currency: "EUR".to_string(),
                is_available: false,
            },
        ]
    }

    #[test]
    fn test_toggle_preserves_selection_order() {
        let mut selection = RoomSelection::new(sample_catalog());

        assert!(selection.toggle("family").unwrap());
        assert!(selection.toggle("std-double").unwrap());
        assert_eq!(selection.selected_ids(), ["family", "std-double"]);

        // Toggling again removes without disturbing the rest
        assert!(!selection.toggle("family").unwrap());
        assert_eq!(selection.selected_ids(), ["std-double"]);
    }

    #[test]
    fn test_toggle_rejects_unknown_and_unavailable_rooms() {
        let mut selection = RoomSelection::new(sample_catalog());

        assert!(matches!(
            selection.toggle("penthouse"),
            Err(RoomError::UnknownRoom(_))
        ));
        assert!(matches!(
            selection.toggle("lakeview"),
            Err(RoomError::RoomUnavailable(_))
        ));
        assert!(selection.selected_ids().is_empty());
    }

    #[test]
    fn test_total_price_and_capacity_follow_selection() {
        let mut selection = RoomSelection::new(sample_catalog());
        selection.toggle("std-double").unwrap();
        selection.toggle("family").unwrap();

        assert_eq!(selection.total_price(), 330.0);
        assert_eq!(selection.capacity(), 6);
        assert_eq!(selection.currency(), Some("EUR"));

        selection.clear();
        assert_eq!(selection.total_price(), 0.0);
        assert_eq!(selection.capacity(), 0);
        assert_eq!(selection.currency(), None);
    }

    #[test]
    fn test_guest_decrement_floors_at_zero() {
        let mut guests = GuestCounts::standard();

        assert_eq!(guests.decrement("children"), Some(0));
        assert_eq!(guests.count("children"), Some(0));

        guests.increment("children");
        guests.increment("children");
        assert_eq!(guests.decrement("children"), Some(1));
    }

    #[test]
    fn test_guest_total_and_validity() {
        let mut guests = GuestCounts::standard();
        assert!(!guests.is_valid());

        guests.increment("adults");
        guests.increment("adults");
        guests.increment("infants");

        assert_eq!(guests.total(), 3);
        assert!(guests.is_valid());
        assert_eq!(guests.count("adults"), Some(2));
    }

    #[test]
    fn test_unknown_guest_category_returns_none() {
        let mut guests = GuestCounts::standard();
        assert_eq!(guests.increment("pets"), None);
        assert_eq!(guests.count("pets"), None);
        assert_eq!(guests.total(), 0);
    }
}
