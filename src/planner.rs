// Planner desks
// Each desk takes raw form values, validates them and drives one data structure.
// Every error here is recoverable: the caller shows it and the user corrects the input.

use crate::activity_tree::{ItineraryTree, TreeError, TreeNode};
use crate::booking::{
    parse_cost, parse_priority, require, Activity, BookingError, CostedBooking, DateChoice,
    Destination, ItineraryEntry, ItineraryItem, Order, PhoneValidator,
};
use crate::cheapest::CheapestHeap;
use crate::config::{ConfigError, OverflowPolicy, PlannerConfig};
use crate::cost_index::CostTree;
use crate::itinerary_list::TravelItinerary;
use crate::itinerary_queue::CircularQueue;
use crate::order_ledger::OrderLedger;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Validation error: {0}")]
    Validation(#[from] BookingError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Itinerary error: {0}")]
    Tree(#[from] TreeError),

    #[error("The itinerary is full ({capacity} entries)")]
    QueueFull { capacity: usize },

    #[error("The itinerary is empty")]
    QueueEmpty,

    #[error("Maximum order limit reached ({max_size} orders)")]
    LedgerFull { max_size: usize },

    #[error("Order not found: {destination} - {activity}")]
    OrderNotFound {
        destination: Destination,
        activity: Activity,
    },

    #[error("No itinerary item with activity {0}")]
    ActivityNotFound(Activity),
}

// Raw field values as typed into a booking form
#[derive(Debug, Clone, Default)]
pub struct BookingForm {
    pub name: String,
    pub phone: String,
    pub destination: String,
    pub activity: String,
    pub cost: String,
    pub date: DateChoice,
}

// Logs and passes through validation failures
fn rejected<T>(result: Result<T, BookingError>) -> Result<T, PlannerError> {
    result.map_err(|e| {
        warn!(error = %e, "Rejected booking form");
        PlannerError::from(e)
    })
}

// Binary search tree sorted by cost, plus a min-heap for the cheapest booking
pub struct CostDesk {
    phones: PhoneValidator,
    cost_index: CostTree,
    cheapest: CheapestHeap,
}

impl CostDesk {
    pub fn new(config: &PlannerConfig) -> Result<Self, PlannerError> {
        Ok(Self {
            phones: config.phone_validator()?,
            cost_index: CostTree::new(),
            cheapest: CheapestHeap::new(),
        })
    }

    // Value to prefill the cost field with; None means the user types it
    pub fn default_cost(&self, destination: &str) -> Result<Option<f64>, PlannerError> {
        let destination: Destination = rejected(destination.parse())?;
        Ok(destination.base_cost())
    }

    fn read_form(&self, form: &BookingForm) -> Result<CostedBooking, BookingError> {
        let name = require(&form.name, "name")?;
        require(&form.phone, "phone")?;
        let destination: Destination = form.destination.parse()?;
        let phone = self.phones.parse(&form.phone)?;
        let cost = parse_cost(&form.cost)?;

        Ok(CostedBooking {
            cost,
            destination,
            name,
            phone,
        })
    }

    pub fn add_to_cost_index(&mut self, form: &BookingForm) -> Result<(), PlannerError> {
        let booking = rejected(self.read_form(form))?;
        info!(destination = %booking.destination, cost = booking.cost, "Added to cost index");
        self.cost_index.insert(booking);
        Ok(())
    }

    pub fn add_to_cheapest(&mut self, form: &BookingForm) -> Result<(), PlannerError> {
        let booking = rejected(self.read_form(form))?;
        info!(destination = %booking.destination, cost = booking.cost, "Added to min-heap");
        self.cheapest.add(booking);
        Ok(())
    }

    // Listing labelled "sorted by rating"; ordered by cost
    pub fn show_sorted(&self) -> Vec<String> {
        self.cost_index
            .inorder()
            .into_iter()
            .map(|b| b.to_string())
            .collect()
    }

    pub fn show_cheapest(&self) -> String {
        match self.cheapest.get_cheapest() {
            Some(booking) => booking.to_string(),
            None => "No destinations in MinHeap.".to_string(),
        }
    }

    pub fn show_all(&self) -> Vec<String> {
        self.cheapest.show_all()
    }

    pub fn cost_index(&self) -> &CostTree {
        &self.cost_index
    }

    pub fn cheapest(&self) -> &CheapestHeap {
        &self.cheapest
    }
}

// Fixed-size itinerary that evicts or rejects when full
pub struct QueueDesk {
    phones: PhoneValidator,
    policy: OverflowPolicy,
    itinerary: CircularQueue<ItineraryEntry>,
}

impl QueueDesk {
    pub fn new(config: &PlannerConfig) -> Result<Self, PlannerError> {
        Ok(Self {
            phones: config.phone_validator()?,
            policy: config.overflow_policy,
            itinerary: CircularQueue::with_capacity(config.queue_capacity),
        })
    }

    fn read_form(&self, form: &BookingForm) -> Result<ItineraryEntry, BookingError> {
        let username = require(&form.name, "username")?;
        require(&form.phone, "phone")?;
        let destination: Destination = form.destination.parse()?;
        let activity = Activity::parse_fixed(&form.activity)?;
        let phone = self.phones.parse(&form.phone)?;
        let date = form.date.resolve()?;

        Ok(ItineraryEntry {
            username,
            phone,
            destination,
            activity,
            date,
        })
    }

    // Uses the configured overflow policy
    pub fn add_itinerary(&mut self, form: &BookingForm) -> Result<Option<ItineraryEntry>, PlannerError> {
        self.add_itinerary_with_policy(form, self.policy)
    }

    // Returns the evicted entry when the oldest one had to make room
    pub fn add_itinerary_with_policy(
        &mut self,
        form: &BookingForm,
        policy: OverflowPolicy,
    ) -> Result<Option<ItineraryEntry>, PlannerError> {
        let entry = rejected(self.read_form(form))?;

        let entry = match self.itinerary.enqueue(entry) {
            Ok(()) => {
                info!(size = self.itinerary.len(), "Itinerary entry added");
                return Ok(None);
            }
            Err(entry) => entry,
        };

        match policy {
            OverflowPolicy::Reject => {
                warn!(capacity = self.itinerary.capacity(), "Itinerary full, entry abandoned");
                Err(PlannerError::QueueFull {
                    capacity: self.itinerary.capacity(),
                })
            }
            OverflowPolicy::EvictOldest => {
                let evicted = self.itinerary.dequeue();
                if self.itinerary.enqueue(entry).is_err() {
                    return Err(PlannerError::QueueFull {
                        capacity: self.itinerary.capacity(),
                    });
                }
                info!(username = ?evicted.as_ref().map(|e| e.username.as_str()), "Evicted oldest itinerary entry");
                Ok(evicted)
            }
        }
    }

    pub fn remove_oldest(&mut self) -> Result<ItineraryEntry, PlannerError> {
        match self.itinerary.dequeue() {
            Some(entry) => {
                info!(username = %entry.username, "Removed oldest itinerary entry");
                Ok(entry)
            }
            None => {
                warn!("Nothing to remove from itinerary");
                Err(PlannerError::QueueEmpty)
            }
        }
    }

    // Oldest first
    pub fn entries(&self) -> Vec<&ItineraryEntry> {
        self.itinerary.display()
    }

    pub fn is_full(&self) -> bool {
        self.itinerary.is_full()
    }
}

pub const NO_ORDERS: &str = "No orders";

// Order book on a bounded doubly-linked list
pub struct LedgerDesk {
    phones: PhoneValidator,
    max_size: usize,
    orders: OrderLedger,
}

impl LedgerDesk {
    pub fn new(config: &PlannerConfig) -> Result<Self, PlannerError> {
        Ok(Self {
            phones: config.phone_validator()?,
            max_size: config.ledger_capacity.get(),
            orders: OrderLedger::with_max_size(config.ledger_capacity),
        })
    }

    pub fn add_order(&mut self, form: &BookingForm) -> Result<(), PlannerError> {
        // Capacity is checked before the form is read
        if self.orders.is_full() {
            warn!(max_size = self.max_size, "Order rejected, ledger full");
            return Err(PlannerError::LedgerFull {
                max_size: self.max_size,
            });
        }

        let order = rejected(self.read_form(form))?;
        self.orders
            .insert_order(order)
            .map_err(|_| PlannerError::LedgerFull {
                max_size: self.max_size,
            })
    }

    fn read_form(&self, form: &BookingForm) -> Result<Order, BookingError> {
        let destination: Destination = form.destination.parse()?;
        let activity = Activity::parse_fixed(&form.activity)?;
        let username = require(&form.name, "username")?;
        let phone = self.phones.parse(&form.phone)?;

        Ok(Order {
            destination,
            activity,
            username,
            phone,
        })
    }

    pub fn remove_order(&mut self, destination: &str, activity: &str) -> Result<Order, PlannerError> {
        let destination: Destination = rejected(destination.parse())?;
        let activity = rejected(Activity::parse_fixed(activity))?;

        self.orders
            .remove_order(destination, &activity)
            .ok_or(PlannerError::OrderNotFound {
                destination,
                activity,
            })
    }

    // Table rows head to tail: destination, activity, username, phone
    pub fn rows(&self) -> Vec<[String; 4]> {
        if self.orders.is_empty() {
            return vec![[NO_ORDERS.to_string(), String::new(), String::new(), String::new()]];
        }

        self.orders
            .iter()
            .map(|order| {
                [
                    order.destination.to_string(),
                    order.activity.to_string(),
                    order.username.clone(),
                    order.phone.to_string(),
                ]
            })
            .collect()
    }

    pub fn ledger(&self) -> &OrderLedger {
        &self.orders
    }
}

// Destination -> activity hierarchy, optionally with priorities
pub struct TreeDesk {
    max_priority: u32,
    prioritized: bool,
    tree: ItineraryTree,
}

// Activities added without an explicit priority in the prioritized tree
const DEFAULT_PRIORITY: u32 = 1;

impl TreeDesk {
    pub fn new(config: &PlannerConfig) -> Self {
        Self {
            max_priority: config.max_priority,
            prioritized: false,
            tree: ItineraryTree::new().with_max_priority(config.max_priority),
        }
    }

    pub fn with_priorities(config: &PlannerConfig) -> Self {
        Self {
            max_priority: config.max_priority,
            prioritized: true,
            tree: ItineraryTree::with_priorities().with_max_priority(config.max_priority),
        }
    }

    pub fn add_activity(
        &mut self,
        destination: &str,
        activity: &str,
        priority: Option<&str>,
    ) -> Result<(), PlannerError> {
        let destination: Destination = rejected(destination.parse())?;
        let activity = rejected(Activity::parse_fixed(activity))?;
        let priority = match priority {
            Some(priority) => Some(rejected(parse_priority(priority, self.max_priority))?),
            None if self.prioritized => Some(DEFAULT_PRIORITY.min(self.max_priority)),
            None => None,
        };

        let node = TreeNode {
            priority,
            ..TreeNode::new(activity.name())
        };
        Ok(self.tree.add_activity(destination.name(), node)?)
    }

    pub fn remove_activity(&mut self, destination: &str, activity: &str) -> Result<TreeNode, PlannerError> {
        let destination: Destination = rejected(destination.parse())?;
        let activity = rejected(Activity::parse_fixed(activity))?;
        Ok(self.tree.remove_activity(destination.name(), activity.name())?)
    }

    pub fn sort_by_priority(&mut self) -> Result<(), PlannerError> {
        Ok(self.tree.sort_by_priority()?)
    }

    pub fn display(&self) -> Vec<String> {
        self.tree.render()
    }

    // Activities currently offered under a destination
    pub fn activity_menu(&self, destination: &str) -> Result<Vec<String>, PlannerError> {
        let destination: Destination = rejected(destination.parse())?;
        self.tree
            .activity_names(destination.name())
            .map(|names| names.into_iter().map(String::from).collect())
            .ok_or_else(|| TreeError::DestinationNotFound(destination.to_string()).into())
    }

    pub fn destination_rows(&self, destination: &str) -> Result<Vec<(String, String)>, PlannerError> {
        let destination: Destination = rejected(destination.parse())?;
        self.tree
            .activity_rows(destination.name())
            .ok_or_else(|| TreeError::DestinationNotFound(destination.to_string()).into())
    }

    pub fn tree(&self) -> &ItineraryTree {
        &self.tree
    }
}

// Plain growable itinerary
#[derive(Default)]
pub struct ListDesk {
    itinerary: TravelItinerary,
}

impl ListDesk {
    pub fn new() -> Self {
        Self::default()
    }

    // Activity may be free text when none of the fixed ones fit
    pub fn add(&mut self, destination: &str, activity: &str, date: &DateChoice) -> Result<(), PlannerError> {
        let destination: Destination = rejected(destination.parse())?;
        let activity: Activity = rejected(activity.parse())?;
        let date = rejected(date.resolve())?;

        self.itinerary.add_itinerary_item(ItineraryItem {
            destination,
            activity,
            date,
        });
        Ok(())
    }

    pub fn remove(&mut self, activity: &str) -> Result<usize, PlannerError> {
        let activity: Activity = rejected(activity.parse())?;
        match self.itinerary.remove_itinerary_item(&activity) {
            0 => Err(PlannerError::ActivityNotFound(activity)),
            removed => Ok(removed),
        }
    }

    pub fn items(&self) -> Vec<String> {
        self.itinerary.get_itinerary_items()
    }
}
