//! Customer and supplier records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: u64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl CustomerDraft {
    pub fn into_customer(self, id: u64, created_at: DateTime<Utc>) -> Customer {
        Customer {
            id,
            name: self.name,
            phone: self.phone,
            email: self.email,
            address: self.address,
            created_at,
        }
    }

    pub fn apply_to(self, customer: &mut Customer) {
        customer.name = self.name;
        customer.phone = self.phone;
        customer.email = self.email;
        customer.address = self.address;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: u64,
    pub name: String,
    pub contact_person: String,
    pub phone: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierDraft {
    pub name: String,
    pub contact_person: String,
    pub phone: String,
    pub email: String,
}

impl SupplierDraft {
    pub fn into_supplier(self, id: u64, created_at: DateTime<Utc>) -> Supplier {
        Supplier {
            id,
            name: self.name,
            contact_person: self.contact_person,
            phone: self.phone,
            email: self.email,
            created_at,
        }
    }

    pub fn apply_to(self, supplier: &mut Supplier) {
        supplier.name = self.name;
        supplier.contact_person = self.contact_person;
        supplier.phone = self.phone;
        supplier.email = self.email;
    }
}
