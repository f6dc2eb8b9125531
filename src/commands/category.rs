//! Category Documents

use location_registry::Category;

use super::document::Document;
use super::error::FirestoreError;

const NAME: &str = "nome";
const DESCRIPTION: &str = "descricao";

/// Decode a category; documents without a name fall back to their id
/// (early collections used the name itself as the id)
pub fn decode(document: &Document) -> Result<Category, FirestoreError> {
    let id = document.id().ok_or(FirestoreError::MissingName)?;
    let name = match document.string(NAME) {
        name if name.is_empty() => id.to_string(),
        name => name,
    };
    Ok(Category {
        id: id.to_string(),
        name,
        description: document.string(DESCRIPTION),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_category() {
        let raw = r#"{
            "name": "projects/mapa/databases/(default)/documents/categorias/k3Jd9",
            "fields": {
                "nome": {"stringValue": "Alimentação"},
                "descricao": {"stringValue": "Distribuição de refeições"}
            }
        }"#;
        let document: Document = serde_json::from_str(raw).expect("parse");
        let category = decode(&document).expect("decode");
        assert_eq!(category.id, "k3Jd9");
        assert_eq!(category.name, "Alimentação");
        assert_eq!(category.description, "Distribuição de refeições");
    }

    #[test]
    fn test_nameless_category_uses_id() {
        let raw = r#"{"name": "projects/mapa/databases/(default)/documents/categorias/abrigo"}"#;
        let document: Document = serde_json::from_str(raw).expect("parse");
        let category = decode(&document).expect("decode");
        assert_eq!(category.name, "abrigo");
        assert_eq!(category.description, "");
    }
}
