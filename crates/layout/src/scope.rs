use folio_template::{DataPath, display_value, lookup};
use serde_json::Value;
use std::sync::Arc;

/// The data context of one band instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    /// The data item the band instance is bound to.
    pub item: Option<Arc<Value>>,
    /// Alias under which the item can be addressed (`itemName`).
    pub item_name: Option<String>,
    pub item_index: Option<usize>,
    pub group_key: Option<String>,
    pub section_index: usize,
    /// 1-based, global.
    pub page_number: usize,
    /// 1-based, restarts with every section.
    pub section_page_number: usize,
}

impl Scope {
    pub fn for_section(section_index: usize) -> Self {
        Self {
            section_index,
            ..Default::default()
        }
    }

    pub fn with_item(mut self, item: Arc<Value>, name: Option<String>, index: usize) -> Self {
        self.item = Some(item);
        self.item_name = name;
        self.item_index = Some(index);
        self
    }

    pub fn with_group(mut self, key: String) -> Self {
        self.group_key = Some(key);
        self
    }

    pub fn on_page(mut self, page_number: usize, section_page_number: usize) -> Self {
        self.page_number = page_number;
        self.section_page_number = section_page_number;
        self
    }

    /// Resolves `path` against the bound item, then the root payload.
    /// A path starting with the item alias addresses the item directly.
    pub fn resolve<'a>(&'a self, path: &str, root: &'a Value) -> Option<&'a Value> {
        if let (Some(name), Some(item)) = (&self.item_name, &self.item) {
            if path == name {
                return Some(item.as_ref());
            }
            if let Some(rest) = path.strip_prefix(name.as_str()).and_then(|r| r.strip_prefix('.')) {
                return DataPath::parse(rest).resolve(item);
            }
        }
        lookup(path, self.item.as_deref(), root)
    }

    /// Display text of the value at `path`. `_groupKey` names the group key.
    pub fn field_text(&self, path: &str, root: &Value) -> Option<String> {
        if path == "_groupKey" {
            return self.group_key.clone();
        }
        self.resolve(path, root).map(display_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_with_alias() {
        let root = json!({"company": "Acme"});
        let scope = Scope::default().with_item(Arc::new(json!({"sku": "A1"})), Some("line".into()), 0);
        assert_eq!(scope.resolve("line.sku", &root), Some(&json!("A1")));
        assert_eq!(scope.resolve("sku", &root), Some(&json!("A1")));
        assert_eq!(scope.resolve("company", &root), Some(&json!("Acme")));
        assert_eq!(scope.resolve("line", &root), Some(&json!({"sku": "A1"})));
    }

    #[test]
    fn test_field_text() {
        let root = json!({});
        let scope = Scope::default()
            .with_item(Arc::new(json!({"qty": 3})), None, 0)
            .with_group("North".into());
        assert_eq!(scope.field_text("qty", &root).as_deref(), Some("3"));
        assert_eq!(scope.field_text("_groupKey", &root).as_deref(), Some("North"));
        assert_eq!(scope.field_text("nope", &root), None);
    }
}
