//! Domain models for the back office.
//!
//! Each model is owned by exactly one service; models do not reference each
//! other (an appointment carries contact details, not a customer id).

pub mod appointment;
pub mod customer;
pub mod testimonial;

pub use appointment::{Appointment, NewAppointment};
pub use customer::{Customer, CustomerUpdate, NewCustomer};
pub use testimonial::{NewTestimonial, Testimonial};
