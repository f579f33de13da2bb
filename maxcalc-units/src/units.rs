//! Unit definitions - the names accepted inside `[a->b]`, by category

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Global unit registry
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

/// Internal identity of a unit, shared by the conversion tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum UnitId {
    // Length
    Mil,
    Inch,
    Foot,
    Yard,
    Mile,
    Micron,
    Millimeter,
    Centimeter,
    Meter,
    Kilometer,
    // Weight
    Pound,
    Ounce,
    Gram,
    Kilogram,
    // Time
    Microsecond,
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    // Speed
    MilePerHour,
    MeterPerSecond,
    FootPerHour,
    KilometerPerHour,
    Knot,
    // Temperature
    Kelvin,
    Celsius,
    Fahrenheit,
    // Angle
    Degree,
    Radian,
    Grad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Length,
    Weight,
    Time,
    Speed,
    Temperature,
    Angle,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Length,
        Category::Weight,
        Category::Time,
        Category::Speed,
        Category::Temperature,
        Category::Angle,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Length => "Length",
            Self::Weight => "Weight",
            Self::Time => "Time",
            Self::Speed => "Speed",
            Self::Temperature => "Temperature",
            Self::Angle => "Angle",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A unit as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unit {
    /// Name written inside a conversion, e.g. "km/h"
    pub name: &'static str,
    pub description: &'static str,
    pub category: Category,
    #[serde(skip)]
    pub(crate) id: UnitId,
}

impl Unit {
    const fn new(name: &'static str, id: UnitId, category: Category, description: &'static str) -> Self {
        Unit {
            name,
            description,
            category,
            id,
        }
    }
}

/// Registry of all known units
pub struct UnitRegistry {
    units: Vec<Unit>,
    by_name: HashMap<String, usize>,
}

impl UnitRegistry {
    fn new() -> Self {
        let mut registry = UnitRegistry {
            units: Vec::new(),
            by_name: HashMap::new(),
        };
        registry.register_length_units();
        registry.register_weight_units();
        registry.register_time_units();
        registry.register_speed_units();
        registry.register_temperature_units();
        registry.register_angle_units();
        registry
    }

    /// Look a unit up by name, ignoring case
    pub fn get(&self, name: &str) -> Option<&Unit> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&index| &self.units[index])
    }

    /// All units in registration order
    pub fn all(&self) -> &[Unit] {
        &self.units
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(move |u| u.category == category)
    }

    fn register(&mut self, unit: Unit) {
        self.by_name.insert(unit.name.to_lowercase(), self.units.len());
        self.units.push(unit);
    }

    fn register_length_units(&mut self) {
        use UnitId::*;
        self.register(Unit::new("mil", Mil, Category::Length, "thousandth of an inch"));
        self.register(Unit::new("in", Inch, Category::Length, "inch"));
        self.register(Unit::new("ft", Foot, Category::Length, "foot"));
        self.register(Unit::new("yd", Yard, Category::Length, "yard"));
        self.register(Unit::new("mi", Mile, Category::Length, "mile"));
        self.register(Unit::new("micron", Micron, Category::Length, "micrometer"));
        self.register(Unit::new("mm", Millimeter, Category::Length, "millimeter"));
        self.register(Unit::new("cm", Centimeter, Category::Length, "centimeter"));
        self.register(Unit::new("m", Meter, Category::Length, "meter"));
        self.register(Unit::new("km", Kilometer, Category::Length, "kilometer"));
    }

    fn register_weight_units(&mut self) {
        use UnitId::*;
        self.register(Unit::new("lb", Pound, Category::Weight, "pound"));
        self.register(Unit::new("oz", Ounce, Category::Weight, "ounce"));
        self.register(Unit::new("g", Gram, Category::Weight, "gram"));
        self.register(Unit::new("kg", Kilogram, Category::Weight, "kilogram"));
    }

    fn register_time_units(&mut self) {
        use UnitId::*;
        self.register(Unit::new("micros", Microsecond, Category::Time, "microsecond"));
        self.register(Unit::new("ms", Millisecond, Category::Time, "millisecond"));
        self.register(Unit::new("s", Second, Category::Time, "second"));
        self.register(Unit::new("min", Minute, Category::Time, "minute"));
        self.register(Unit::new("h", Hour, Category::Time, "hour"));
        self.register(Unit::new("d", Day, Category::Time, "day"));
    }

    fn register_speed_units(&mut self) {
        use UnitId::*;
        self.register(Unit::new("mi/h", MilePerHour, Category::Speed, "miles per hour"));
        self.register(Unit::new("m/s", MeterPerSecond, Category::Speed, "meters per second"));
        self.register(Unit::new("ft/h", FootPerHour, Category::Speed, "feet per hour"));
        self.register(Unit::new("km/h", KilometerPerHour, Category::Speed, "kilometers per hour"));
        self.register(Unit::new("knot", Knot, Category::Speed, "nautical mile per hour"));
    }

    fn register_temperature_units(&mut self) {
        use UnitId::*;
        self.register(Unit::new("k", Kelvin, Category::Temperature, "kelvin"));
        self.register(Unit::new("c", Celsius, Category::Temperature, "degree Celsius"));
        self.register(Unit::new("f", Fahrenheit, Category::Temperature, "degree Fahrenheit"));
    }

    fn register_angle_units(&mut self) {
        use UnitId::*;
        self.register(Unit::new("deg", Degree, Category::Angle, "degree"));
        self.register(Unit::new("rad", Radian, Category::Angle, "radian"));
        self.register(Unit::new("grad", Grad, Category::Angle, "gradian"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case() {
        assert_eq!(UNITS.get("KM/H").map(|u| u.name), Some("km/h"));
        assert_eq!(UNITS.get("C").map(|u| u.category), Some(Category::Temperature));
        assert!(UNITS.get("unit").is_none());
        assert!(UNITS.get("").is_none());
    }

    #[test]
    fn test_every_category_is_populated() {
        for category in Category::ALL {
            assert!(UNITS.by_category(category).count() > 0, "{} is empty", category);
        }
        assert_eq!(UNITS.by_category(Category::Length).count(), 10);
        assert_eq!(UNITS.all().len(), 31);
    }

    #[test]
    fn test_unit_serializes_without_id() {
        let json = serde_json::to_string(UNITS.get("knot").unwrap()).unwrap();
        assert_eq!(
            json,
            r#"{"name":"knot","description":"nautical mile per hour","category":"speed"}"#
        );
    }
}
