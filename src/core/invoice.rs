//! Invoice business logic - Amounts billed to a project's client.

use crate::{
    core::{period::DateRange, project::require_project, validation::InvoiceForm},
    entities::{Invoice, Project, invoice},
    errors::{Error, Result},
};
use sea_orm::{IntoActiveModel, QueryOrder, QuerySelect, Select, Set, prelude::*};
use serde::Serialize;
use tracing::instrument;

/// An invoice joined with the name of the project billed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceEntry {
    #[serde(flatten)]
    pub invoice: invoice::Model,
    pub project_name: String,
}

async fn load_entries<C: ConnectionTrait>(
    db: &C,
    query: Select<Invoice>,
) -> Result<Vec<InvoiceEntry>> {
    let rows = query.find_also_related(Project).all(db).await?;
    Ok(rows
        .into_iter()
        .map(|(invoice, project)| InvoiceEntry {
            invoice,
            project_name: project.map(|p| p.name).unwrap_or_default(),
        })
        .collect())
}

/// Every invoice, newest first.
pub async fn get_all_invoices<C: ConnectionTrait>(db: &C) -> Result<Vec<InvoiceEntry>> {
    let query = Invoice::find()
        .order_by_desc(invoice::Column::InvoiceDate)
        .order_by_desc(invoice::Column::Id);
    load_entries(db, query).await
}

/// The most recent `limit` invoices, newest first.
pub async fn get_recent_invoices<C: ConnectionTrait>(
    db: &C,
    limit: u64,
) -> Result<Vec<InvoiceEntry>> {
    let query = Invoice::find()
        .order_by_desc(invoice::Column::InvoiceDate)
        .order_by_desc(invoice::Column::Id)
        .limit(limit);
    load_entries(db, query).await
}

/// Invoices dated inside `range`, oldest first.
pub async fn get_invoices_in_range<C: ConnectionTrait>(
    db: &C,
    range: DateRange,
) -> Result<Vec<invoice::Model>> {
    Invoice::find()
        .filter(invoice::Column::InvoiceDate.between(range.start, range.end))
        .order_by_asc(invoice::Column::InvoiceDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Every invoice ever issued, in id order.
pub async fn get_all_invoice_rows<C: ConnectionTrait>(db: &C) -> Result<Vec<invoice::Model>> {
    Invoice::find()
        .order_by_asc(invoice::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Issues or overwrites an invoice. The project must exist.
#[instrument(skip(db))]
pub async fn save_invoice<C: ConnectionTrait>(
    db: &C,
    form: &InvoiceForm,
    existing_id: Option<i64>,
) -> Result<invoice::Model> {
    require_project(db, form.project_id).await?;

    let mut model = match existing_id {
        Some(id) => Invoice::find_by_id(id)
            .one(db)
            .await?
            .ok_or(Error::NotFound {
                entity: "Invoice",
                id,
            })?
            .into_active_model(),
        None => invoice::ActiveModel {
            ..Default::default()
        },
    };
    model.project_id = Set(form.project_id);
    model.amount_charged = Set(form.amount_charged);
    model.invoice_date = Set(form.invoice_date);

    if existing_id.is_some() {
        model.update(db).await.map_err(Into::into)
    } else {
        model.insert(db).await.map_err(Into::into)
    }
}

/// Deletes an invoice. Returns false when nothing matched.
pub async fn delete_invoice<C: ConnectionTrait>(db: &C, id: i64) -> Result<bool> {
    let result = Invoice::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn test_invoices_listed_newest_first_with_project_name() -> Result<()> {
        let db = setup_test_db().await?;
        let garage = create_test_project(&db, "Garage", "2024-01-01").await?;
        create_test_invoice(&db, garage.id, 1000.0, "2024-01-15").await?;
        create_test_invoice(&db, garage.id, 2500.0, "2024-02-15").await?;

        let all = get_all_invoices(&db).await?;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].invoice.amount_charged, 2500.0);
        assert_eq!(all[0].project_name, "Garage");

        let recent = get_recent_invoices(&db, 1).await?;
        assert_eq!(recent.len(), 1);

        let january = DateRange {
            start: date("2024-01-01"),
            end: date("2024-01-31"),
        };
        assert_eq!(get_invoices_in_range(&db, january).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_invoice_requires_project() -> Result<()> {
        let db = setup_test_db().await?;
        let form = InvoiceForm {
            project_id: 3,
            amount_charged: 100.0,
            invoice_date: date("2024-01-01"),
        };
        assert!(matches!(
            save_invoice(&db, &form, None).await,
            Err(Error::NotFound {
                entity: "Project",
                ..
            })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_and_delete_invoice() -> Result<()> {
        let db = setup_test_db().await?;
        let garage = create_test_project(&db, "Garage", "2024-01-01").await?;
        let invoice = create_test_invoice(&db, garage.id, 1000.0, "2024-01-15").await?;

        let form = InvoiceForm {
            project_id: garage.id,
            amount_charged: 1200.0,
            invoice_date: date("2024-01-20"),
        };
        let updated = save_invoice(&db, &form, Some(invoice.id)).await?;
        assert_eq!(updated.amount_charged, 1200.0);

        assert!(delete_invoice(&db, invoice.id).await?);
        assert!(get_all_invoice_rows(&db).await?.is_empty());
        Ok(())
    }
}
