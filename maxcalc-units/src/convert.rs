//! Conversion tables

use crate::error::UnitError;
use crate::units::{UnitId, UNITS};
use maxcalc_core::{ArithmeticError, BigDecimal};
use tracing::debug;

/// `value[from] * factor = value[to]`; also used in reverse by division
struct LinearConversion {
    from: UnitId,
    to: UnitId,
    factor: &'static str,
}

/// Closed-form conversion, valid in the listed direction only
struct FunctionConversion {
    from: UnitId,
    to: UnitId,
    apply: fn(&BigDecimal) -> Result<BigDecimal, ArithmeticError>,
}

const fn linear(from: UnitId, to: UnitId, factor: &'static str) -> LinearConversion {
    LinearConversion { from, to, factor }
}

// Factors carry 150 digits; parsing rounds them to working precision.
static LINEAR: &[LinearConversion] = {
    use UnitId::*;
    &[
        // Length
        linear(Mil, Micron, "25.4"),
        linear(Inch, Mil, "1000"),
        linear(Inch, Micron, "25400"),
        linear(Inch, Millimeter, "25.4"),
        linear(Inch, Centimeter, "2.54"),
        linear(Foot, Mil, "12000"),
        linear(Foot, Inch, "12"),
        linear(Foot, Micron, "304800"),
        linear(Foot, Millimeter, "304.8"),
        linear(Foot, Centimeter, "30.48"),
        linear(Yard, Mil, "36000"),
        linear(Yard, Inch, "36"),
        linear(Yard, Foot, "3"),
        linear(Yard, Micron, "914400"),
        linear(Yard, Millimeter, "914.4"),
        linear(Yard, Centimeter, "91.44"),
        linear(Mile, Mil, "63360000"),
        linear(Mile, Inch, "63360"),
        linear(Mile, Foot, "5280"),
        linear(Mile, Yard, "1760"),
        linear(Mile, Micron, "1609344000"),
        linear(Mile, Millimeter, "1609344"),
        linear(Mile, Centimeter, "160934.4"),
        linear(Mile, Meter, "1609.344"),
        linear(Mile, Kilometer, "1.609344"),
        linear(Millimeter, Mil, "39370.078740157480314960629921259842519685039370078740157480314960629921259842519685039370078740157480314960629921259842519685039370078740157480314960629921e-3"),
        linear(Millimeter, Micron, "1000"),
        linear(Centimeter, Mil, "39370.078740157480314960629921259842519685039370078740157480314960629921259842519685039370078740157480314960629921259842519685039370078740157480314960629921e-2"),
        linear(Centimeter, Micron, "10000"),
        linear(Centimeter, Millimeter, "10"),
        linear(Meter, Mil, "39370.078740157480314960629921259842519685039370078740157480314960629921259842519685039370078740157480314960629921259842519685039370078740157480314960629921"),
        linear(Meter, Inch, "39.370078740157480314960629921259842519685039370078740157480314960629921259842519685039370078740157480314960629921259842519685039370078740157480314960629921"),
        linear(Meter, Foot, "3.2808398950131233595800524934383202099737532808398950131233595800524934383202099737532808398950131233595800524934383202099737532808398950131233595800524934"),
        linear(Meter, Yard, "1.0936132983377077865266841644794400699912510936132983377077865266841644794400699912510936132983377077865266841644794400699912510936132983377077865266841645"),
        linear(Meter, Micron, "1000000"),
        linear(Meter, Millimeter, "1000"),
        linear(Meter, Centimeter, "100"),
        linear(Kilometer, Mil, "39370.078740157480314960629921259842519685039370078740157480314960629921259842519685039370078740157480314960629921259842519685039370078740157480314960629921e+3"),
        linear(Kilometer, Inch, "39.370078740157480314960629921259842519685039370078740157480314960629921259842519685039370078740157480314960629921259842519685039370078740157480314960629921e+3"),
        linear(Kilometer, Foot, "3.2808398950131233595800524934383202099737532808398950131233595800524934383202099737532808398950131233595800524934383202099737532808398950131233595800524934e+3"),
        linear(Kilometer, Yard, "1.0936132983377077865266841644794400699912510936132983377077865266841644794400699912510936132983377077865266841644794400699912510936132983377077865266841645e+3"),
        linear(Kilometer, Micron, "1000000000"),
        linear(Kilometer, Millimeter, "1000000"),
        linear(Kilometer, Centimeter, "100000"),
        linear(Kilometer, Meter, "1000"),
        // Weight
        linear(Pound, Ounce, "16.000002821917267029565227206668754885444268544934799601545281895425389918418371810175269281455206296261806196365934943519325900403251977458524870967832965"),
        linear(Pound, Gram, "453.5924"),
        linear(Ounce, Gram, "28.34952"),
        linear(Kilogram, Pound, "2.2046224760379583079434311509628468201848179114112141208715137202475173746297336551494249021809007381957898765499598317784865883996292706844294569309362326"),
        linear(Kilogram, Ounce, "35.273965837869565340083359436068053356811684995019316023692817373980229647627190866018190078703272577454574186793991573755040649718231560887097912063414125"),
        linear(Kilogram, Gram, "1000"),
        // Time
        linear(Millisecond, Microsecond, "1000"),
        linear(Second, Microsecond, "1000000"),
        linear(Second, Millisecond, "1000"),
        linear(Minute, Microsecond, "60000000"),
        linear(Minute, Millisecond, "60000"),
        linear(Minute, Second, "60"),
        linear(Hour, Microsecond, "3600000000"),
        linear(Hour, Millisecond, "3600000"),
        linear(Hour, Second, "3600"),
        linear(Hour, Minute, "60"),
        linear(Day, Microsecond, "86400000000"),
        linear(Day, Millisecond, "86400000"),
        linear(Day, Second, "86400"),
        linear(Day, Minute, "1440"),
        linear(Day, Hour, "24"),
        // Speed
        linear(MilePerHour, FootPerHour, "1760"),
        linear(MilePerHour, KilometerPerHour, "1.609344"),
        linear(MeterPerSecond, MilePerHour, "2.2369362920544022906227630637079455977093772369362920544022906227630637079455977093772369362920544022906227630637079455977093772369362920544022906227630637"),
        linear(MeterPerSecond, FootPerHour, "3937.0078740157480314960629921259842519685039370078740157480314960629921259842519685039370078740157480314960629921259842519685039370078740157480314960629921"),
        linear(MeterPerSecond, KilometerPerHour, "3.6"),
        linear(MeterPerSecond, Knot, "1.9438444924406047516198704103671706263498920086393088552915766738660907127429805615550755939524838012958963282937365010799136069114470842332613390928725702"),
        linear(KilometerPerHour, FootPerHour, "1093.6132983377077865266841644794400699912510936132983377077865266841644794400699912510936132983377077865266841644794400699912510936132983377077865266841645"),
        linear(Knot, MilePerHour, "1.1507794480235425117314881094408653463771574007794480235425117314881094408653463771574007794480235425117314881094408653463771574007794480235425117314881094"),
        linear(Knot, FootPerHour, "2025.3718285214348206474190726159230096237970253718285214348206474190726159230096237970253718285214348206474190726159230096237970253718285214348206474190726"),
        linear(Knot, KilometerPerHour, "1.852"),
        // Angle
        linear(Grad, Degree, "0.9"),
    ]
};

static FUNCTIONS: &[FunctionConversion] = {
    use UnitId::*;
    &[
        FunctionConversion { from: Celsius, to: Fahrenheit, apply: celsius_to_fahrenheit },
        FunctionConversion { from: Celsius, to: Kelvin, apply: celsius_to_kelvin },
        FunctionConversion { from: Fahrenheit, to: Celsius, apply: fahrenheit_to_celsius },
        FunctionConversion { from: Fahrenheit, to: Kelvin, apply: fahrenheit_to_kelvin },
        FunctionConversion { from: Kelvin, to: Celsius, apply: kelvin_to_celsius },
        FunctionConversion { from: Kelvin, to: Fahrenheit, apply: kelvin_to_fahrenheit },
        FunctionConversion { from: Degree, to: Radian, apply: degrees_to_radians },
        FunctionConversion { from: Radian, to: Degree, apply: radians_to_degrees },
        FunctionConversion { from: Grad, to: Radian, apply: grads_to_radians },
        FunctionConversion { from: Radian, to: Grad, apply: radians_to_grads },
    ]
};

/// Convert `value` from unit `from` to unit `to`
///
/// Unit names are matched case-insensitively. Linear entries are tried
/// in both directions before the closed-form ones.
pub fn convert(value: &BigDecimal, from: &str, to: &str) -> Result<BigDecimal, UnitError> {
    let source = UNITS
        .get(from)
        .ok_or_else(|| UnitError::UnknownUnit(from.to_string()))?;
    let target = UNITS
        .get(to)
        .ok_or_else(|| UnitError::UnknownUnit(to.to_string()))?;
    debug!(from = source.name, to = target.name, "unit conversion");

    for entry in LINEAR {
        if entry.from == source.id && entry.to == target.id {
            return Ok(value.mul(&BigDecimal::parse(entry.factor)?)?);
        }
        if entry.from == target.id && entry.to == source.id {
            return Ok(value.div(&BigDecimal::parse(entry.factor)?)?);
        }
    }

    FUNCTIONS
        .iter()
        .find(|entry| entry.from == source.id && entry.to == target.id)
        .ok_or_else(|| UnitError::UnknownConversion {
            from: from.to_string(),
            to: to.to_string(),
        })
        .and_then(|entry| (entry.apply)(value).map_err(UnitError::from))
}

fn constant(text: &str) -> Result<BigDecimal, ArithmeticError> {
    BigDecimal::parse(text)
}

fn celsius_to_fahrenheit(x: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
    x.mul(&constant("1.8")?)?.add(&BigDecimal::from(32))
}

fn celsius_to_kelvin(x: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
    x.add(&constant("273.15")?)
}

fn fahrenheit_to_kelvin(x: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
    x.add(&constant("459.67")?)?
        .mul(&BigDecimal::from(5))?
        .div(&BigDecimal::from(9))
}

fn fahrenheit_to_celsius(x: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
    fahrenheit_to_kelvin(x)?.sub(&constant("273.15")?)
}

fn kelvin_to_celsius(x: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
    x.sub(&constant("273.15")?)
}

fn kelvin_to_fahrenheit(x: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
    celsius_to_fahrenheit(&kelvin_to_celsius(x)?)
}

fn degrees_to_radians(x: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
    x.mul(&BigDecimal::pi())?.div(&BigDecimal::from(180))
}

fn radians_to_degrees(x: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
    x.mul(&BigDecimal::from(180))?.div(&BigDecimal::pi())
}

fn grads_to_radians(x: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
    x.mul(&BigDecimal::pi())?.div(&BigDecimal::from(200))
}

fn radians_to_grads(x: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
    x.mul(&BigDecimal::from(200))?.div(&BigDecimal::pi())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(value: &str, from: &str, to: &str) -> String {
        let value = BigDecimal::parse(value).unwrap();
        convert(&value, from, to).unwrap().to_string()
    }

    #[test]
    fn test_linear_both_directions() {
        assert_eq!(run("1", "ft", "in"), "12");
        assert_eq!(run("12", "in", "ft"), "1");
        assert_eq!(run("1", "mi", "km"), "1.609344");
        assert_eq!(run("2", "d", "h"), "48");
        assert_eq!(run("36", "km/h", "m/s"), "10");
        assert_eq!(run("100", "grad", "deg"), "90");
    }

    #[test]
    fn test_high_precision_factor() {
        assert_eq!(
            run("1", "m", "ft"),
            "3.2808398950131233595800524934383202099737532808399"
        );
        assert_eq!(run("1", "kg", "g"), "1000");
    }

    #[test]
    fn test_temperature() {
        assert_eq!(run("0", "c", "f"), "32");
        assert_eq!(run("100", "C", "F"), "212");
        assert_eq!(run("32", "f", "c"), "0");
        assert_eq!(run("0", "k", "c"), "-273.15");
        assert_eq!(run("-40", "f", "c"), "-40");
        assert_eq!(run("273.15", "k", "f"), "32");
    }

    #[test]
    fn test_angles() {
        assert_eq!(run("180", "deg", "rad"), BigDecimal::pi().to_string());
        assert_eq!(run("200", "grad", "rad"), BigDecimal::pi().to_string());
        let pi = BigDecimal::pi();
        assert_eq!(convert(&pi, "rad", "deg").unwrap().to_string(), "180");
        assert_eq!(convert(&pi, "rad", "grad").unwrap().to_string(), "200");
    }

    #[test]
    fn test_failures() {
        let one = BigDecimal::one();
        assert_eq!(
            convert(&one, "unit", "km"),
            Err(UnitError::UnknownUnit("unit".to_string()))
        );
        assert_eq!(
            convert(&one, "km", "furlong"),
            Err(UnitError::UnknownUnit("furlong".to_string()))
        );
        assert!(matches!(
            convert(&one, "km", "kg"),
            Err(UnitError::UnknownConversion { .. })
        ));
        assert!(matches!(
            convert(&one, "m", "m"),
            Err(UnitError::UnknownConversion { .. })
        ));
    }
}
