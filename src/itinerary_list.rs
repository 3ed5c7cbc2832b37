// Unbounded itinerary list

use crate::booking::{Activity, ItineraryItem};
use tracing::info;

#[derive(Default)]
pub struct TravelItinerary {
    itinerary: Vec<ItineraryItem>,
}

impl TravelItinerary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_itinerary_item(&mut self, item: ItineraryItem) {
        info!(item = %item, "Adding itinerary item");
        self.itinerary.push(item);
    }

    // Drops every item with this activity, returns how many went
    pub fn remove_itinerary_item(&mut self, activity: &Activity) -> usize {
        let before = self.itinerary.len();
        self.itinerary.retain(|item| &item.activity != activity);
        let removed = before - self.itinerary.len();
        info!(%activity, removed, "Removed itinerary items");
        removed
    }

    pub fn get_itinerary_items(&self) -> Vec<String> {
        self.itinerary.iter().map(|item| item.to_string()).collect()
    }

    pub fn items(&self) -> &[ItineraryItem] {
        &self.itinerary
    }

    pub fn len(&self) -> usize {
        self.itinerary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itinerary.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::Destination;

    fn item(destination: Destination, activity: Activity, date: &str) -> ItineraryItem {
        ItineraryItem {
            destination,
            activity,
            date: date.parse().unwrap(),
        }
    }

    #[test]
    fn test_items_in_insertion_order() {
        let mut itinerary = TravelItinerary::new();
        itinerary.add_itinerary_item(item(Destination::LakeKivu, Activity::Swimming, "2025-01-10"));
        itinerary.add_itinerary_item(item(
            Destination::VolcanoesNationalPark,
            Activity::Hiking,
            "2025-01-11",
        ));

        assert_eq!(
            itinerary.get_itinerary_items(),
            vec![
                "Swimming in Lake Kivu on 2025-01-10",
                "Hiking in Volcanoes National Park on 2025-01-11",
            ]
        );
    }

    #[test]
    fn test_remove_drops_every_match() {
        let mut itinerary = TravelItinerary::new();
        itinerary.add_itinerary_item(item(Destination::LakeKivu, Activity::Swimming, "2025-01-10"));
        itinerary.add_itinerary_item(item(Destination::LakeKivu, Activity::Leisuring, "2025-01-11"));
        itinerary.add_itinerary_item(item(
            Destination::AkageraNationalPark,
            Activity::Swimming,
            "2025-01-12",
        ));

        assert_eq!(itinerary.remove_itinerary_item(&Activity::Swimming), 2);
        assert_eq!(itinerary.len(), 1);
        assert_eq!(itinerary.items()[0].activity, Activity::Leisuring);

        assert_eq!(itinerary.remove_itinerary_item(&Activity::Hiking), 0);
        assert_eq!(itinerary.len(), 1);
    }
}
