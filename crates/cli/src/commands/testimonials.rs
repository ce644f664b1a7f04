//! Testimonial commands.

use clap::Subcommand;
use tracing::warn;

use lingam_admin::error::Result;
use lingam_admin::models::NewTestimonial;
use lingam_admin::{AppError, AppState};
use lingam_core::TestimonialId;

use super::output::print_json;

#[derive(Subcommand)]
pub enum TestimonialAction {
    /// Submit a testimonial (starts unreviewed)
    Submit {
        /// Customer display name
        #[arg(long)]
        name: String,

        /// Testimonial text
        #[arg(long)]
        content: String,

        /// Star rating, expected 1-5
        #[arg(long, allow_negative_numbers = true)]
        rating: f64,

        /// Image URL or asset path
        #[arg(long)]
        image: Option<String>,
    },
    /// List testimonials
    List {
        /// Only approved testimonials
        #[arg(long, conflicts_with = "homepage")]
        approved: bool,

        /// Only testimonials featured on the homepage
        #[arg(long)]
        homepage: bool,
    },
    /// Toggle approval (revoking also removes from the homepage)
    Approve { id: TestimonialId },
    /// Toggle homepage placement of an approved testimonial
    Feature { id: TestimonialId },
    /// Delete a testimonial
    Delete { id: TestimonialId },
    /// Delete every testimonial
    Clear,
}

/// Execute a testimonial command.
///
/// # Errors
///
/// Returns `AppError::NotFound` when a command needs a testimonial that does
/// not exist, or an error if the collection cannot be persisted.
pub async fn run(state: &AppState, action: TestimonialAction) -> Result<()> {
    let testimonials = state.testimonials();

    match action {
        TestimonialAction::Submit {
            name,
            content,
            rating,
            image,
        } => {
            let mut submission = NewTestimonial::new(name, content, rating);
            submission.image = image;
            print_json(&testimonials.create(submission).await?)
        }
        TestimonialAction::List { approved, homepage } => {
            let listed = if homepage {
                testimonials.list_homepage().await
            } else if approved {
                testimonials.list_approved().await
            } else {
                testimonials.list_all().await
            };
            print_json(&listed)
        }
        TestimonialAction::Approve { id } => {
            let updated = testimonials
                .toggle_approval(id)
                .await?
                .ok_or_else(|| AppError::not_found("testimonial", id))?;
            print_json(&updated)
        }
        TestimonialAction::Feature { id } => {
            let updated = testimonials
                .toggle_homepage(id)
                .await?
                .ok_or_else(|| AppError::not_found("testimonial", id))?;
            if !updated.is_approved() {
                warn!(%id, "Testimonial must be approved before it can be featured");
            }
            print_json(&updated)
        }
        TestimonialAction::Delete { id } => {
            if !testimonials.delete(id).await? {
                warn!(%id, "No testimonial to delete");
            }
            Ok(())
        }
        TestimonialAction::Clear => {
            testimonials.clear_all().await?;
            Ok(())
        }
    }
}
