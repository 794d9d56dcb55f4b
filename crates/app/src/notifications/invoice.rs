//! Booking invoices rendered as plain text.

use std::fmt;

use jiff::civil::Date;
use roomkeeper::{pricing::Quote, stay::Stay};

use crate::{
    domain::{
        bookings::records::{BookingAddonRecord, BookingRecord, BookingUuid, GuestRecord},
        rooms::records::RoomRecord,
    },
    notifications::{Attachment, InvoiceEmail},
};

/// An addon line on an invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceLine {
    pub description: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub amount: u64,
}

/// Invoice for a newly created booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoice {
    pub booking: BookingUuid,
    pub issued_on: Date,
    pub guest_name: String,
    pub guest_email: String,
    pub room_number: u32,
    pub room_type: String,
    pub stay: Stay,
    pub nightly_rate: u64,
    pub lines: Vec<InvoiceLine>,
    pub quote: Quote,
}

impl Invoice {
    pub fn new(
        booking: &BookingRecord,
        guest: &GuestRecord,
        room: &RoomRecord,
        addons: &[BookingAddonRecord],
        quote: Quote,
        issued_on: Date,
    ) -> Self {
        let lines = addons
            .iter()
            .map(|addon| InvoiceLine {
                description: addon.name.clone(),
                quantity: addon.quantity,
                unit_price: addon.unit_price,
                amount: addon
                    .unit_price
                    .saturating_mul(u64::from(addon.quantity)),
            })
            .collect();

        Self {
            booking: booking.uuid,
            issued_on,
            guest_name: guest.name.clone(),
            guest_email: guest.email.clone(),
            room_number: room.room_number,
            room_type: room.room_type_name.clone(),
            stay: booking.stay,
            nightly_rate: room.base_price,
            lines,
            quote,
        }
    }

    pub fn filename(&self) -> String {
        format!("booking-{}-invoice.txt", self.booking)
    }

    /// Wrap the invoice in an email to the guest.
    pub fn into_email(self) -> InvoiceEmail {
        let body = format!(
            "Dear {},\n\nThank you for your booking. Your invoice for booking {} is attached.\n",
            self.guest_name, self.booking
        );

        InvoiceEmail {
            recipient: self.guest_email.clone(),
            subject: format!("Your booking invoice {}", self.booking),
            body,
            attachment: Attachment {
                filename: self.filename(),
                content: self.to_string(),
            },
        }
    }
}

/// Plain-text rendering of the invoice.
impl fmt::Display for Invoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "INVOICE")?;
        writeln!(f, "Booking: {}", self.booking)?;
        writeln!(f, "Issued: {}", self.issued_on)?;
        writeln!(f)?;
        writeln!(f, "Guest: {} <{}>", self.guest_name, self.guest_email)?;
        writeln!(f, "Room: {} ({})", self.room_number, self.room_type)?;
        writeln!(f, "Check-in: {}", self.stay.check_in())?;
        writeln!(f, "Check-out: {}", self.stay.check_out())?;
        writeln!(f)?;
        writeln!(
            f,
            "Room: {} nights x {} = {}",
            self.stay.nights(),
            self.nightly_rate,
            self.quote.room_amount
        )?;

        for line in &self.lines {
            writeln!(
                f,
                "{}: {} x {} = {}",
                line.description, line.quantity, line.unit_price, line.amount
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Addons: {}", self.quote.addon_amount)?;
        writeln!(f, "Total paid: {}", self.quote.total)
    }
}
