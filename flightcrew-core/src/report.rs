use std::fmt::Write;

use crate::offers::{Offer, OfferCollection};

/// Render validated offers as a markdown report. Offers keep response order
/// and amounts are printed exactly as the backend sent them.
pub fn render_report(goal: &str, offers: &OfferCollection) -> String {
    let mut out = String::new();
    writeln!(out, "# Flight Report\n").ok();

    let goal = goal.trim();
    if !goal.is_empty() {
        writeln!(out, "> {}\n", goal.replace('\n', "\n> ")).ok();
    }

    if offers.is_empty() {
        writeln!(out, "No flights found.").ok();
        return out;
    }

    writeln!(out, "Found {} flight offer(s).\n", offers.len()).ok();
    writeln!(
        out,
        "| # | Route | Departure | Arrival | Flights | Stops | Duration | Seats | Price |"
    )
    .ok();
    writeln!(out, "|---|---|---|---|---|---|---|---|---|").ok();
    for offer in offers {
        writeln!(out, "{}", table_row(offer)).ok();
    }

    writeln!(out, "\n## Fees\n").ok();
    for offer in offers {
        let fees: Vec<String> = offer
            .price
            .fees
            .iter()
            .map(|f| format!("{} {} {}", f.fee_type, f.amount, offer.price.currency))
            .collect();
        let listed = if fees.is_empty() { "none".to_string() } else { fees.join(", ") };
        writeln!(
            out,
            "- Offer {}: base {} {}, total {} {}; fees: {}",
            offer.id,
            offer.price.base,
            offer.price.currency,
            offer.price.total,
            offer.price.currency,
            listed
        )
        .ok();
    }

    out
}

fn table_row(offer: &Offer) -> String {
    let first = offer.first_segment();
    let last = offer.outbound_last_segment();

    let origin = first.and_then(|s| s.departure_airport()).unwrap_or("?");
    let destination = last.and_then(|s| s.arrival_airport()).unwrap_or("?");
    let departs = first.and_then(|s| s.departure_time()).unwrap_or("-");
    let arrives = last.and_then(|s| s.arrival_time()).unwrap_or("-");
    let flights = offer
        .itineraries
        .first()
        .map(|i| i.segments.iter().map(|s| s.flight_designator()).collect::<Vec<_>>().join(" / "))
        .unwrap_or_default();
    let duration = offer.itineraries.first().map(|i| i.duration.as_str()).unwrap_or("-");

    format!(
        "| {} | {} → {} | {} | {} | {} | {} | {} | {} | {} {} |",
        offer.id,
        origin,
        destination,
        departs,
        arrives,
        flights,
        offer.total_stops(),
        duration,
        offer.number_of_bookable_seats,
        offer.price.grand_total,
        offer.price.currency
    )
}
