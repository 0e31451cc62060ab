use std::fmt;
use std::str::FromStr;

/// The raw, user-entered fields of the search form
///
/// Every field is stored exactly as typed. Nothing is validated or derived
/// here; the request builder decides how each field is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    item_id: String,
    category_name: String,
    condition: String,
    min_price: String,
    max_price: String,
}

/// Names one of the editable fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    ItemId,
    CategoryName,
    Condition,
    MinPrice,
    MaxPrice,
}

impl InputField {
    pub const ALL: [InputField; 5] = [
        InputField::ItemId,
        InputField::CategoryName,
        InputField::Condition,
        InputField::MinPrice,
        InputField::MaxPrice,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            InputField::ItemId => "Item ID",
            InputField::CategoryName => "Category",
            InputField::Condition => "Condition",
            InputField::MinPrice => "Min Price",
            InputField::MaxPrice => "Max Price",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for InputField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "item" | "item_id" | "id" => Ok(InputField::ItemId),
            "category" | "category_name" => Ok(InputField::CategoryName),
            "condition" => Ok(InputField::Condition),
            "min" | "min_price" => Ok(InputField::MinPrice),
            "max" | "max_price" => Ok(InputField::MaxPrice),
            other => Err(format!("unknown field '{}'", other)),
        }
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn category_name(&self) -> &str {
        &self.category_name
    }

    pub fn condition(&self) -> &str {
        &self.condition
    }

    pub fn min_price(&self) -> &str {
        &self.min_price
    }

    pub fn max_price(&self) -> &str {
        &self.max_price
    }

    pub fn set_item_id(&mut self, value: impl Into<String>) {
        self.item_id = value.into();
    }

    pub fn set_category_name(&mut self, value: impl Into<String>) {
        self.category_name = value.into();
    }

    pub fn set_condition(&mut self, value: impl Into<String>) {
        self.condition = value.into();
    }

    pub fn set_min_price(&mut self, value: impl Into<String>) {
        self.min_price = value.into();
    }

    pub fn set_max_price(&mut self, value: impl Into<String>) {
        self.max_price = value.into();
    }

    /// Replaces one field by name
    pub fn set(&mut self, field: InputField, value: impl Into<String>) {
        match field {
            InputField::ItemId => self.set_item_id(value),
            InputField::CategoryName => self.set_category_name(value),
            InputField::Condition => self.set_condition(value),
            InputField::MinPrice => self.set_min_price(value),
            InputField::MaxPrice => self.set_max_price(value),
        }
    }

    pub fn get(&self, field: InputField) -> &str {
        match field {
            InputField::ItemId => self.item_id(),
            InputField::CategoryName => self.category_name(),
            InputField::Condition => self.condition(),
            InputField::MinPrice => self.min_price(),
            InputField::MaxPrice => self.max_price(),
        }
    }

    /// Whether the recommend trigger is enabled.
    ///
    /// Checks the raw item id, so a whitespace-only id still enables it.
    pub fn can_fetch_recommendations(&self, loading: bool) -> bool {
        !loading && !self.item_id.is_empty()
    }

    /// Whether the cluster trigger is enabled
    pub fn can_fetch_cluster_items(&self) -> bool {
        !self.item_id.is_empty()
    }
}
