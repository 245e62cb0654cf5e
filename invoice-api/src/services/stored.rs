//! MongoDB-side shapes of the API models.
//!
//! JSON carries timestamps as RFC 3339 strings; the collections hold native BSON dates.

use chrono::{DateTime, Utc};
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::models::{Contact, Invoice, Party, Timesheet, WorkHourEntry};

/// A model that can be written to and read back from a collection.
pub trait MongoDocument: Sized {
    type Stored: Serialize + DeserializeOwned + Unpin + Send + Sync;

    fn into_stored(self) -> Self::Stored;

    fn from_stored(stored: Self::Stored) -> Self;
}

impl MongoDocument for Contact {
    type Stored = Contact;

    fn into_stored(self) -> Self::Stored {
        self
    }

    fn from_stored(stored: Self::Stored) -> Self {
        stored
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredInvoice {
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    date: DateTime<Utc>,
    invoice_number: String,
    work_order_number: String,
    rate_per_hour: f64,
    currency: String,
    total_hours: f64,
    total_amount: f64,
    sub_contractor: Party,
    bill_to: Party,
    #[serde(default)]
    timesheets: Vec<StoredTimesheet>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredTimesheet {
    week_number: String,
    week_duration: String,
    #[serde(default)]
    work_hours: Vec<StoredWorkHourEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredWorkHourEntry {
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    date: DateTime<Utc>,
    hours: f64,
    total_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    comments: Option<String>,
}

impl MongoDocument for Invoice {
    type Stored = StoredInvoice;

    fn into_stored(self) -> Self::Stored {
        StoredInvoice {
            date: self.date,
            invoice_number: self.invoice_number,
            work_order_number: self.work_order_number,
            rate_per_hour: self.rate_per_hour,
            currency: self.currency,
            total_hours: self.total_hours,
            total_amount: self.total_amount,
            sub_contractor: self.sub_contractor,
            bill_to: self.bill_to,
            timesheets: self
                .timesheets
                .into_iter()
                .map(|sheet| StoredTimesheet {
                    week_number: sheet.week_number,
                    week_duration: sheet.week_duration,
                    work_hours: sheet
                        .work_hours
                        .into_iter()
                        .map(|entry| StoredWorkHourEntry {
                            date: entry.date,
                            hours: entry.hours,
                            total_amount: entry.total_amount,
                            comments: entry.comments,
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    fn from_stored(stored: Self::Stored) -> Self {
        Invoice {
            date: stored.date,
            invoice_number: stored.invoice_number,
            work_order_number: stored.work_order_number,
            rate_per_hour: stored.rate_per_hour,
            currency: stored.currency,
            total_hours: stored.total_hours,
            total_amount: stored.total_amount,
            sub_contractor: stored.sub_contractor,
            bill_to: stored.bill_to,
            timesheets: stored
                .timesheets
                .into_iter()
                .map(|sheet| Timesheet {
                    week_number: sheet.week_number,
                    week_duration: sheet.week_duration,
                    work_hours: sheet
                        .work_hours
                        .into_iter()
                        .map(|entry| WorkHourEntry {
                            date: entry.date,
                            hours: entry.hours,
                            total_amount: entry.total_amount,
                            comments: entry.comments,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mongodb::bson::{self, doc, spec::ElementType, Bson};

    fn invoice() -> Invoice {
        let day = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        Invoice {
            date: day,
            invoice_number: "INV-1".to_string(),
            work_order_number: "WO-1".to_string(),
            rate_per_hour: 85.0,
            currency: "USD".to_string(),
            total_hours: 8.0,
            total_amount: 680.0,
            sub_contractor: Party::default(),
            bill_to: Party::default(),
            timesheets: vec![Timesheet {
                week_number: "27".to_string(),
                week_duration: "2024-07-01 - 2024-07-05".to_string(),
                work_hours: vec![WorkHourEntry {
                    date: day,
                    hours: 8.0,
                    total_amount: 680.0,
                    comments: None,
                }],
            }],
        }
    }

    #[test]
    fn invoice_dates_are_written_as_bson_dates() {
        let doc = bson::to_document(&invoice().into_stored()).unwrap();

        assert_eq!(doc.get("date").unwrap().element_type(), ElementType::DateTime);

        let entry = doc.get_array("timesheets").unwrap()[0]
            .as_document()
            .unwrap()
            .get_array("workHours")
            .unwrap()[0]
            .as_document()
            .unwrap()
            .clone();
        assert_eq!(entry.get("date").unwrap().element_type(), ElementType::DateTime);
        assert!(entry.get("comments").is_none());
    }

    #[test]
    fn reads_documents_holding_native_dates() {
        let day = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        let stored = doc! {
            "date": bson::DateTime::from_chrono(day),
            "invoiceNumber": "INV-1",
            "workOrderNumber": "WO-1",
            "ratePerHour": 85,
            "currency": "USD",
            "totalHours": 8.0,
            "totalAmount": 680.0,
            "subContractor": { "name": "", "address": {} },
            "billTo": { "name": "", "address": {} },
            "timesheets": [{
                "weekNumber": "27",
                "weekDuration": "2024-07-01 - 2024-07-05",
                "workHours": [{ "date": bson::DateTime::from_chrono(day), "hours": 8.0, "totalAmount": 680.0 }]
            }],
        };

        let read: StoredInvoice = bson::from_bson(Bson::Document(stored)).unwrap();
        assert_eq!(Invoice::from_stored(read), invoice());
    }
}
