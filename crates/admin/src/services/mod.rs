//! Business logic services for the back office.
//!
//! # Services
//!
//! - `appointments` - Showroom booking and appointment lifecycle
//! - `availability` - Free slot computation for a calendar day
//! - `customers` - Customer ledger with visit and purchase tracking
//! - `testimonials` - Testimonial submission and moderation

pub mod appointments;
pub mod availability;
pub mod customers;
pub mod testimonials;

pub use appointments::AppointmentService;
pub use availability::available_slots;
pub use customers::CustomerService;
pub use testimonials::TestimonialService;
