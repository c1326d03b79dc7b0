use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::serde_helpers::null_as_default;

/// Full menu payload for one outlet, exactly as exchanged with clients.
///
/// Every field falls back to its zero value when missing or `null`, so
/// partial documents are accepted and stored as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuDocument {
    #[serde(deserialize_with = "null_as_default")]
    pub status: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub code: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub result: String,
    #[serde(deserialize_with = "null_as_default")]
    pub msg: String,
    #[serde(deserialize_with = "null_as_default")]
    pub output: Output,
}

impl MenuDocument {
    /// Outlet identifier carried inside the document (`output.city.id`), if non-zero.
    pub fn embedded_outlet_id(&self) -> Option<i64> {
        Some(self.output.city.id).filter(|id| *id != 0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Output {
    #[serde(deserialize_with = "null_as_default")]
    pub default_displat_cat: String,
    #[serde(deserialize_with = "null_as_default")]
    pub default_cat_img_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub prepare_default_timein_min: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub prepare_cap_timein_min: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub hide_show_before_end_timein_min: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub status_update_timein_sec: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub outlet_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city: CityInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub r: Vec<Item>,
    #[serde(deserialize_with = "null_as_default")]
    pub cat: Vec<String>,
    pub repeat: Value,
    #[serde(deserialize_with = "null_as_default")]
    pub cats: Vec<Category>,
    #[serde(deserialize_with = "null_as_default")]
    pub aqt: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub nams: String,
    #[serde(deserialize_with = "null_as_default")]
    pub empty_cart: String,
    #[serde(deserialize_with = "null_as_default")]
    pub item_quantity_limit: String,
    #[serde(deserialize_with = "null_as_default")]
    pub delivery_location: String,
    pub pu: Value,
    pub ph: Value,
    #[serde(deserialize_with = "null_as_default")]
    pub offers: Vec<Offer>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CityInfo {
    /// Numeric city identifier; doubles as the outlet identifier on writes.
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(deserialize_with = "null_as_default")]
    pub has_sub_cities: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subcities: Vec<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub lat: String,
    #[serde(deserialize_with = "null_as_default")]
    pub lng: String,
    pub image: Option<String>,
    pub image_r: Option<String>,
}

/// One sellable menu entry. The short keys (`h`, `dp`, `ct`, ...) are the
/// wire names used by the ordering apps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Item {
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    pub item_package: Value,
    #[serde(deserialize_with = "null_as_default")]
    pub food_type: i64,
    pub img_data: Value,
    #[serde(deserialize_with = "null_as_default")]
    pub best_seller: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub combo: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub combo_items: Vec<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub add_on: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub add_on_items: Vec<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub preparation_time: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub upgradable: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub upsellable: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub upgrade_items: Vec<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub upsell_items: Vec<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub preparation_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub h: String,
    #[serde(deserialize_with = "null_as_default")]
    pub op: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub dp: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub ho: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ct: String,
    #[serde(deserialize_with = "null_as_default")]
    pub veg: bool,
    pub dis: Value,
    pub i: Option<String>,
    pub sf: Value,
    #[serde(deserialize_with = "null_as_default")]
    pub wt: String,
    #[serde(deserialize_with = "null_as_default")]
    pub en: String,
    #[serde(deserialize_with = "null_as_default")]
    pub fa: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Category {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image_url: String,
}

/// Promotional offer attached to an outlet menu.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Offer {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub chain_key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub vou_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub vou_desc: String,
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bank: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bank_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub bank_vou_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bank_vou_type_sub: String,
    #[serde(deserialize_with = "null_as_default")]
    pub disc_app_pay_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub app_for: String,
    #[serde(deserialize_with = "null_as_default")]
    pub for_booklet: String,
    #[serde(deserialize_with = "null_as_default")]
    pub loyalty: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub tnc: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub valid_from: String,
    #[serde(deserialize_with = "null_as_default")]
    pub valid_to: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image_vertical: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image_horizontal: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bank_image: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cities: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subscription: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub redemption_outlet: String,
    #[serde(deserialize_with = "null_as_default")]
    pub theater: String,
    #[serde(deserialize_with = "null_as_default")]
    pub on_the_fly: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub best_offer: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub best_offer_url: String,
}

/// Sample payload served when neither the store nor the snapshot has anything.
pub fn default_menu() -> MenuDocument {
    MenuDocument {
        status: 200,
        code: 10001,
        result: "success".into(),
        msg: String::new(),
        output: Output {
            outlet_name: "Default INOX".into(),
            city: CityInfo {
                name: "Default City".into(),
                state: "Default State".into(),
                ..Default::default()
            },
            r: vec![Item {
                id: "I0001".into(),
                h: "Sample Popcorn".into(),
                dp: 50000,
                ct: "POPCORN".into(),
                veg: true,
                wt: "100 g".into(),
                en: "300 kcal".into(),
                ..Default::default()
            }],
            cat: vec!["POPCORN".into()],
            ..Default::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_body_decodes_with_zero_values() {
        let doc: MenuDocument = serde_json::from_value(json!({
            "status": 200,
            "output": { "city": { "id": 42 }, "outletName": "Test" }
        }))
        .unwrap();

        assert_eq!(doc.status, 200);
        assert_eq!(doc.output.outlet_name, "Test");
        assert_eq!(doc.embedded_outlet_id(), Some(42));
        assert!(doc.output.r.is_empty());
        assert_eq!(doc.output.repeat, Value::Null);
    }

    #[test]
    fn test_wire_names() {
        let mut doc = default_menu();
        doc.output.offers.push(Offer {
            kind: "BANK".into(),
            on_the_fly: true,
            ..Default::default()
        });
        doc.output.city.image_r = Some("r.png".into());

        let value = serde_json::to_value(&doc).unwrap();
        let output = &value["output"];
        assert_eq!(output["outletName"], "Default INOX");
        assert_eq!(output["prepareDefaultTimeinMin"], 0);
        assert_eq!(output["defaultDisplatCat"], "");
        assert_eq!(output["city"]["hasSubCities"], false);
        assert_eq!(output["city"]["imageR"], "r.png");
        assert_eq!(output["r"][0]["dp"], 50000);
        assert_eq!(output["r"][0]["i"], Value::Null);
        assert_eq!(output["offers"][0]["type"], "BANK");
        assert_eq!(output["offers"][0]["onTheFly"], true);
    }

    #[test]
    fn test_opaque_fields_are_preserved() {
        let body = json!({
            "status": 200,
            "output": {
                "repeat": { "anything": [1, 2, 3] },
                "pu": "x",
                "r": [{ "id": "A", "itemPackage": { "size": "L" }, "comboItems": [{ "id": "B" }] }]
            }
        });
        let doc: MenuDocument = serde_json::from_value(body).unwrap();
        let back = serde_json::to_value(&doc).unwrap();

        assert_eq!(back["output"]["repeat"], json!({ "anything": [1, 2, 3] }));
        assert_eq!(back["output"]["pu"], "x");
        assert_eq!(back["output"]["r"][0]["itemPackage"], json!({ "size": "L" }));
        assert_eq!(back["output"]["r"][0]["comboItems"][0]["id"], "B");
    }

    #[test]
    fn test_zero_city_id_is_not_an_outlet() {
        assert_eq!(default_menu().embedded_outlet_id(), None);
    }

    #[test]
    fn test_null_lists_and_strings_decode() {
        let doc: MenuDocument = serde_json::from_str(
            r#"{"status":200,"code":null,"result":null,"msg":null,"output":{"city":{"id":42,"subcities":null,"name":null},"r":null,"cat":null,"cats":null,"offers":null,"outletName":null}}"#,
        )
        .unwrap();

        assert_eq!(doc.status, 200);
        assert_eq!(doc.msg, "");
        assert_eq!(doc.embedded_outlet_id(), Some(42));
        assert!(doc.output.city.subcities.is_empty());
        assert!(doc.output.r.is_empty());
        assert!(doc.output.cat.is_empty());
        assert!(doc.output.offers.is_empty());
        assert_eq!(doc.output.outlet_name, "");
    }

    #[test]
    fn test_null_nested_objects_decode() {
        let doc: MenuDocument =
            serde_json::from_str(r#"{"status":200,"output":{"city":null}}"#).unwrap();
        assert_eq!(doc.output.city, CityInfo::default());

        let doc: MenuDocument = serde_json::from_str(r#"{"status":200,"output":null}"#).unwrap();
        assert_eq!(doc.output, Output::default());
    }

    #[test]
    fn test_decodes_original_wire_format() {
        let doc: MenuDocument =
            serde_json::from_str(include_str!("../../tests/fixtures/original_menu.json")).unwrap();

        assert_eq!(doc.output.outlet_name, "INOX Megaplex");
        assert_eq!(doc.embedded_outlet_id(), Some(42));
        assert_eq!(doc.output.city.image, None);
        assert!(doc.output.cats.is_empty());
        assert_eq!(doc.output.r[0].dp, 42000);
        assert!(doc.output.r[0].combo_items.is_empty());
        assert_eq!(doc.output.r[0].i, None);
        assert_eq!(doc.output.offers[0].kind, "BANK");
        assert!(doc.output.offers[0].tnc.is_empty());
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let result = serde_json::from_value::<MenuDocument>(json!({ "status": "ok" }));
        assert!(result.is_err());
    }
}
