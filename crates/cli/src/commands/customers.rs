//! Customer ledger commands.

use clap::Subcommand;
use tracing::warn;

use lingam_admin::error::Result;
use lingam_admin::models::{CustomerUpdate, NewCustomer};
use lingam_admin::{AppError, AppState};
use lingam_core::{CustomerId, Email};

use super::output::print_json;

#[derive(Subcommand)]
pub enum CustomerAction {
    /// Register a customer
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: Email,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        address: Option<String>,
    },
    /// List every customer
    List,
    /// Show one customer
    Show { id: CustomerId },
    /// Find the first customer with an email (case-insensitive)
    Find { email: String },
    /// Change contact details
    Update {
        id: CustomerId,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<Email>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        address: Option<String>,
    },
    /// Record a showroom visit
    Visit { id: CustomerId },
    /// Record a purchase (also counts as a visit)
    Purchase { id: CustomerId },
    /// Delete a customer
    Delete { id: CustomerId },
}

/// Execute a customer command.
///
/// # Errors
///
/// Returns `AppError::NotFound` when a command needs a customer that does not
/// exist, `AppError::BadRequest` for an update with no fields, or an error if
/// the collection cannot be persisted.
pub async fn run(state: &AppState, action: CustomerAction) -> Result<()> {
    let customers = state.customers();

    match action {
        CustomerAction::Add {
            name,
            email,
            phone,
            address,
        } => {
            let created = customers
                .create(NewCustomer {
                    name,
                    email,
                    phone,
                    address,
                })
                .await?;
            print_json(&created)
        }
        CustomerAction::List => print_json(&customers.list().await),
        CustomerAction::Show { id } => {
            let customer = customers
                .get(id)
                .await
                .ok_or_else(|| AppError::not_found("customer", id))?;
            print_json(&customer)
        }
        CustomerAction::Find { email } => {
            let customer = customers
                .find_by_email(&email)
                .await
                .ok_or_else(|| AppError::NotFound(format!("customer with email {email}")))?;
            print_json(&customer)
        }
        CustomerAction::Update {
            id,
            name,
            email,
            phone,
            address,
        } => {
            let changes = CustomerUpdate {
                name,
                email,
                phone,
                address,
                ..CustomerUpdate::default()
            };
            if changes.is_empty() {
                return Err(AppError::BadRequest(
                    "nothing to update: pass at least one of --name, --email, --phone, --address"
                        .to_string(),
                ));
            }
            let updated = customers
                .update(id, changes)
                .await?
                .ok_or_else(|| AppError::not_found("customer", id))?;
            print_json(&updated)
        }
        CustomerAction::Visit { id } => {
            let updated = customers
                .record_visit(id)
                .await?
                .ok_or_else(|| AppError::not_found("customer", id))?;
            print_json(&updated)
        }
        CustomerAction::Purchase { id } => {
            let updated = customers
                .record_purchase(id)
                .await?
                .ok_or_else(|| AppError::not_found("customer", id))?;
            print_json(&updated)
        }
        CustomerAction::Delete { id } => {
            if !customers.delete(id).await? {
                warn!(%id, "No customer to delete");
            }
            Ok(())
        }
    }
}
