use serde::de::{self, EnumAccess, IgnoredAny, MapAccess, SeqAccess, VariantAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One calculation request: daily activity quantities as entered by the user.
///
/// Every field is optional. Values are untrusted: deserialization never fails on
/// a field value, and anything that is not a number or numeric string is kept
/// as `NaN` so the calculator can sanitize it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorInput {
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub car_miles_per_day: Option<f64>,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub flights_per_day: Option<f64>,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub public_transport_miles_per_day: Option<f64>,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub electricity_kwh_per_day: Option<f64>,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub gas_therms_per_day: Option<f64>,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub renewable_percent: Option<f64>,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub meat_meals_per_day: Option<f64>,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub dairy_servings_per_day: Option<f64>,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub local_food_percent: Option<f64>,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub waste_bags_per_day: Option<f64>,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub recycling_percent: Option<f64>,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub shopping_spend_per_day: Option<f64>,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub electronics_items_per_day: Option<f64>,
}

fn lenient_quantity<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(QuantityVisitor)
}

/// Accepts any value: numbers pass through unchanged (non-finite included),
/// numeric strings are parsed, blanks and nulls are absent, the rest is `NaN`.
struct QuantityVisitor;

impl<'de> Visitor<'de> for QuantityVisitor {
    type Value = Option<f64>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number, a numeric string or null")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        Ok(Some(trimmed.parse::<f64>().unwrap_or(f64::NAN)))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(Some(f64::NAN))
    }

    fn visit_bytes<E: de::Error>(self, _: &[u8]) -> Result<Self::Value, E> {
        Ok(Some(f64::NAN))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Some(f64::NAN))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Some(f64::NAN))
    }

    fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> Result<Self::Value, A::Error> {
        let (IgnoredAny, variant) = data.variant::<IgnoredAny>()?;
        variant.newtype_variant::<IgnoredAny>()?;
        Ok(Some(f64::NAN))
    }
}
