//! Route templates for span names and metric labels.

use uuid::Uuid;

/// Collapse id segments so every booking or room shares one label.
pub(super) fn route_template(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{id}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_ids_are_collapsed() {
        assert_eq!(
            route_template("/booking/0191c0a6-8b5e-7cc0-9d9e-4a3f2b1c0d11"),
            "/booking/{id}"
        );
    }

    #[test]
    fn test_room_status_route_keeps_trailing_segment() {
        assert_eq!(
            route_template("/room/0191c0a6-8b5e-7cc0-9d9e-4a3f2b1c0d11/status"),
            "/room/{id}/status"
        );
    }

    #[test]
    fn test_named_routes_are_unchanged() {
        assert_eq!(route_template("/room/availableRooms"), "/room/availableRooms");
        assert_eq!(route_template("/"), "/");
    }
}
