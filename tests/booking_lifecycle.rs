//! Pure engine walk-through of the booking lifecycle.
//!
//! Prices, refunds and reschedule settlements for the reference scenarios, without storage.

use jiff::{ToSpan, civil::date};
use testresult::TestResult;

use roomkeeper::prelude::*;

const BASE_PRICE: u64 = 1000;

#[test]
fn three_night_booking_is_priced_per_night() -> TestResult {
    let stay = Stay::new(date(2026, 1, 10), date(2026, 1, 13))?;
    let quote = quote(&stay, BASE_PRICE, &[])?;

    assert_eq!(quote.total, 3000);

    Ok(())
}

#[test]
fn addons_parsed_from_tokens_are_added_to_the_total() -> TestResult {
    let stay = Stay::new(date(2026, 1, 10), date(2026, 1, 12))?;
    let tokens = parse_addon_tokens(&[
        "0191c0a6-8b5e-7cc0-9d9e-4a3f2b1c0d11:2",
        "0191c0a6-8b5e-7cc0-9d9e-4a3f2b1c0d12:1",
    ])?;

    let lines: Vec<AddonLine> = tokens
        .iter()
        .map(|token| AddonLine {
            unit_price: 150,
            quantity: token.quantity,
        })
        .collect();

    let quote = quote(&stay, BASE_PRICE, &lines)?;

    assert_eq!(quote.room_amount, 2000);
    assert_eq!(quote.addon_amount, 450);
    assert_eq!(quote.total, 2450);

    Ok(())
}

#[test]
fn cancelling_two_days_out_refunds_eighty_percent() -> TestResult {
    let today = date(2026, 1, 1);
    let stay = Stay::new(today.saturating_add(2.days()), today.saturating_add(3.days()))?;
    let quote = CancellationPolicy::standard().quote(&stay, 1000, today)?;

    assert_eq!(quote.refund_amount, 800);
    assert_eq!(quote.message(), "Refund of 800 will be processed in 2 days.");

    Ok(())
}

#[test]
fn cancelling_ten_days_out_refunds_everything() -> TestResult {
    let today = date(2026, 1, 1);
    let stay = Stay::new(today.saturating_add(10.days()), today.saturating_add(12.days()))?;
    let quote = CancellationPolicy::standard().quote(&stay, 2000, today)?;

    assert_eq!(quote.tier, RefundTier::Early);
    assert_eq!(quote.refund_amount, 2000);
    assert_eq!(
        quote.message(),
        "Full refund of 2000 will be processed in 2 days."
    );

    Ok(())
}

#[test]
fn extending_a_stay_charges_the_difference() -> TestResult {
    let today = date(2026, 1, 1);
    let original = Stay::new(date(2026, 1, 10), date(2026, 1, 13))?;
    let extended = Stay::new(date(2026, 1, 10), date(2026, 1, 15))?;
    let policy = ReschedulePolicy::standard();

    policy.ensure_not_too_late(original.check_in(), today)?;

    let paid = room_amount(&original, BASE_PRICE)?;
    let new_total = room_amount(&extended, BASE_PRICE)?;
    let settlement = policy.settle(paid, new_total)?;

    assert_eq!(paid, 3000);
    assert_eq!(new_total, 5000);
    assert_eq!(settlement, Settlement::TopUp { amount: 2000 });
    assert_eq!(settlement.difference(), 2000);

    Ok(())
}

#[test]
fn rescheduled_booking_does_not_conflict_with_its_old_dates() -> TestResult {
    let original = Stay::new(date(2026, 1, 10), date(2026, 1, 13))?;
    let extended = Stay::new(date(2026, 1, 10), date(2026, 1, 15))?;
    let neighbour = Stay::new(date(2026, 1, 15), date(2026, 1, 17))?;

    let others = [neighbour];

    assert!(original.overlaps(&extended));
    assert!(!others.iter().any(|other| other.overlaps(&extended)));

    Ok(())
}

#[test]
fn calendar_excludes_booked_nights_only() -> TestResult {
    let today = date(2026, 1, 1);
    let calendar = AvailabilityCalendar::standard(today);
    let first = Stay::new(date(2026, 1, 5), date(2026, 1, 8))?;
    let second = Stay::new(date(2026, 1, 8), date(2026, 1, 9))?;

    let free = calendar.free_dates([&first, &second]);

    assert_eq!(free.len(), 91 - 4);
    assert!(free.contains(&date(2026, 1, 4)));
    assert!(free.contains(&date(2026, 1, 9)));
    assert!(!free.contains(&date(2026, 1, 8)));

    Ok(())
}

#[test]
fn cancelled_and_completed_bookings_are_final() {
    for status in [BookingStatus::Cancelled, BookingStatus::Completed] {
        assert!(!status.can_transition_to(BookingStatus::Confirmed));
    }
}
