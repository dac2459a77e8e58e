//! Room directory: maps store rows to [`Room`]s by named columns.

use riadops_core::Room;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ServerError, ServerResult};
use crate::store::{Table, TableStore};

/// Header names of the room table's columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomColumns {
    /// Room identifier column (required).
    pub id: String,
    /// Display name column (required).
    pub name: String,
    /// Property tag column.
    pub property: String,
    /// Feed URL column.
    pub ical_url: String,
}

impl Default for RoomColumns {
    fn default() -> Self {
        Self {
            id: "Room ID".to_string(),
            name: "Room Name".to_string(),
            property: "Property".to_string(),
            ical_url: "iCal URL".to_string(),
        }
    }
}

/// Converts the rows of a room table into rooms.
///
/// Rows with a blank id are skipped. A missing property or URL column
/// leaves those fields empty; a missing id or name column is an error.
pub fn rooms_from_table(table: &Table, columns: &RoomColumns) -> ServerResult<Vec<Room>> {
    for required in [&columns.id, &columns.name] {
        if !table.has_column(required) {
            return Err(ServerError::store(
                &table.name,
                format!("missing column '{}'", required),
            ));
        }
    }

    let mut rooms = Vec::with_capacity(table.rows.len());
    for (idx, row) in table.rows.iter().enumerate() {
        let Some(id) = row.get_non_empty(&columns.id) else {
            // +2: one for the header, one for 1-based numbering.
            warn!(table = %table.name, line = idx + 2, "Skipping room row without an id");
            continue;
        };

        let mut room = Room::new(
            id,
            row.get(&columns.name).unwrap_or_default(),
            row.get(&columns.property).unwrap_or_default(),
        );
        if let Some(url) = row.get_non_empty(&columns.ical_url) {
            room = room.with_ical_url(url);
        }
        rooms.push(room);
    }

    debug!(table = %table.name, rooms = rooms.len(), "Loaded rooms");
    Ok(rooms)
}

/// Reads the room table from `store`.
pub fn load_rooms(
    store: &dyn TableStore,
    table: &str,
    columns: &RoomColumns,
) -> ServerResult<Vec<Room>> {
    let table = store.read_table(table)?;
    rooms_from_table(&table, columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Row;

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table {
            name: "Rooms".to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|cells| Row::from_pairs(headers.iter().zip(cells.iter().copied())))
                .collect(),
        }
    }

    #[test]
    fn maps_named_columns_in_any_order() {
        let table = table(
            &["iCal URL", "Guests", "Property", "Room Name", "Room ID"],
            &[
                &["https://a.test/r1.ics", "2", "Riad Nour", "Jasmine", "r1"],
                &["", "3", "Dar Zitoun", "Mint", "r2"],
            ],
        );

        let rooms = rooms_from_table(&table, &RoomColumns::default()).unwrap();
        assert_eq!(
            rooms,
            vec![
                Room::new("r1", "Jasmine", "Riad Nour").with_ical_url("https://a.test/r1.ics"),
                Room::new("r2", "Mint", "Dar Zitoun"),
            ]
        );
    }

    #[test]
    fn skips_rows_without_id() {
        let table = table(
            &["Room ID", "Room Name"],
            &[&["", "Ghost"], &["r1", "Jasmine"]],
        );

        let rooms = rooms_from_table(&table, &RoomColumns::default()).unwrap();
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].id, "r1");
        assert_eq!(rooms[0].property, "");
        assert!(rooms[0].ical_url.is_none());
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let table = table(&["Room Name", "Property"], &[&["Jasmine", "Riad Nour"]]);

        let err = rooms_from_table(&table, &RoomColumns::default()).unwrap_err();
        assert!(err.to_string().contains("missing column 'Room ID'"));
    }

    #[test]
    fn custom_column_names() {
        let columns = RoomColumns {
            id: "Chambre".to_string(),
            name: "Nom".to_string(),
            property: "Maison".to_string(),
            ical_url: "Calendrier".to_string(),
        };
        let table = table(
            &["Chambre", "Nom", "Maison", "Calendrier"],
            &[&["c7", "Rose", "Riad Nour", "webcal://b.test/c7"]],
        );

        let rooms = rooms_from_table(&table, &columns).unwrap();
        assert_eq!(rooms[0].ical_url.as_deref(), Some("webcal://b.test/c7"));
    }
}
