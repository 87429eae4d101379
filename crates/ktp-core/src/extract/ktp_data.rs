use serde::{Deserialize, Serialize};

/// Fields extracted from a KTP card.
///
/// Each field is present only when its pattern matched. Serialized keys
/// follow the card's own labels: `NIK`, `Nama` and `Tanggal Lahir`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KtpData {
    /// National identity number, exactly 16 digits.
    #[serde(rename = "NIK", default, skip_serializing_if = "Option::is_none")]
    pub nik: Option<String>,

    /// Holder name as read from the line following the NIK.
    #[serde(rename = "Nama", default, skip_serializing_if = "Option::is_none")]
    pub nama: Option<String>,

    /// Birth date in the card's `dd-mm-yyyy` or `dd/mm/yyyy` form.
    #[serde(
        rename = "Tanggal Lahir",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub tanggal_lahir: Option<String>,
}

impl KtpData {
    /// Returns the number of fields that matched.
    #[must_use]
    pub fn len(&self) -> usize {
        [&self.nik, &self.nama, &self.tanggal_lahir]
            .into_iter()
            .filter(|field| field.is_some())
            .count()
    }

    /// Returns `true` when no field matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn absent_fields_are_omitted() {
        let data = KtpData {
            nik: Some("3201011234567890".to_owned()),
            ..Default::default()
        };

        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value, json!({ "NIK": "3201011234567890" }));
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn empty_data_serializes_to_empty_object() {
        let value = serde_json::to_value(KtpData::default()).unwrap();
        assert_eq!(value, json!({}));
        assert!(KtpData::default().is_empty());
    }

    #[test]
    fn labels_are_used_as_keys() {
        let value = json!({
            "NIK": "3201011234567890",
            "Nama": "BUDI SANTOSO",
            "Tanggal Lahir": "01-01-1990",
        });

        let data: KtpData = serde_json::from_value(value).unwrap();
        assert_eq!(data.nama.as_deref(), Some("BUDI SANTOSO"));
        assert_eq!(data.tanggal_lahir.as_deref(), Some("01-01-1990"));
        assert_eq!(data.len(), 3);
    }
}
