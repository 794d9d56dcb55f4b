//! Addons Repository

use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    bookings::records::{
        AddonRecord, AddonUuid, BookingAddonRecord, BookingAddonUuid, BookingUuid,
    },
    columns::{amount_to_i64, try_get_amount},
};

const LIST_ADDONS_SQL: &str = include_str!("../sql/list_addons.sql");
const CREATE_BOOKING_ADDON_SQL: &str = include_str!("../sql/create_booking_addon.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAddonsRepository;

impl PgAddonsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Resolve addons by id. Unknown ids are absent from the map.
    pub(crate) async fn find_addons(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        addons: &[AddonUuid],
    ) -> Result<FxHashMap<AddonUuid, AddonRecord>, sqlx::Error> {
        if addons.is_empty() {
            return Ok(FxHashMap::default());
        }

        let uuids: Vec<Uuid> = addons.iter().map(|addon| addon.into_uuid()).collect();

        let records = query_as::<Postgres, AddonRecord>(LIST_ADDONS_SQL)
            .bind(&uuids)
            .fetch_all(&mut **tx)
            .await?;

        Ok(records
            .into_iter()
            .map(|record| (record.uuid, record))
            .collect())
    }

    pub(crate) async fn create_booking_addon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
        addon: &AddonRecord,
        quantity: u32,
    ) -> Result<BookingAddonRecord, sqlx::Error> {
        let uuid = BookingAddonUuid::new();

        let quantity_i32 = i32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        query(CREATE_BOOKING_ADDON_SQL)
            .bind(uuid.into_uuid())
            .bind(booking.into_uuid())
            .bind(addon.uuid.into_uuid())
            .bind(quantity_i32)
            .bind(amount_to_i64(addon.base_price, "unit_price")?)
            .execute(&mut **tx)
            .await?;

        Ok(BookingAddonRecord {
            uuid,
            booking_uuid: booking,
            addon_uuid: addon.uuid,
            name: addon.name.clone(),
            quantity,
            unit_price: addon.base_price,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for AddonRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AddonUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            base_price: try_get_amount(row, "base_price")?,
        })
    }
}
