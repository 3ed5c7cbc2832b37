// Main library file for the travel itinerary planner

// Booking records and validation
pub mod booking;
pub mod config;

// One module per data structure
pub mod activity_tree;
pub mod cheapest;
pub mod cost_index;
pub mod itinerary_list;
pub mod itinerary_queue;
pub mod order_ledger;

// Form handling for each planner variant
pub mod planner;

// Re-export key types for convenience
pub use activity_tree::{counting_sort_by_key, ItineraryTree, TreeError, TreeNode};
pub use booking::{
    validate_phone_number, Activity, BookingError, CostedBooking, DateChoice, Destination,
    ItineraryEntry, ItineraryItem, Order, PhoneNumber, PhoneValidator, TravelDate,
};
pub use cheapest::CheapestHeap;
pub use config::{ConfigError, OverflowPolicy, PlannerConfig};
pub use cost_index::CostTree;
pub use itinerary_list::TravelItinerary;
pub use itinerary_queue::CircularQueue;
pub use order_ledger::{DoublyLinkedList, OrderLedger};
pub use planner::{
    BookingForm, CostDesk, LedgerDesk, ListDesk, PlannerError, QueueDesk, TreeDesk,
};
