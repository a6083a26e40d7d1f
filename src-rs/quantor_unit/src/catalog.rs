//! The built-in unit families
//!
//! Every unit here is defined directly against the standard unit of its
//! family. Absolute families name the relative family whose units measure
//! their differences; each absolute unit is paired with the relative unit
//! that has the same id.

use std::f64::consts::PI;

use crate::{
    ConstructionError, Scale, SiPrefixes, UnitBase, UnitBuilder, UnitRegistry, UnitSystem,
};

macro_rules! quantities {
    ($($constant:ident => $name:literal,)*) => {
        /// Names of the built-in unit families.
        pub mod quantity {
            $(
                #[doc = concat!("`", $name, "`")]
                pub const $constant: &str = $name;
            )*

            /// Every built-in family name, in registration order.
            pub const ALL: &[&str] = &[$($constant),*];
        }
    };
}

quantities! {
    DIMENSIONLESS => "Dimensionless",
    ANGLE => "Angle",
    LENGTH => "Length",
    POSITION => "Position",
    MASS => "Mass",
    DURATION => "Duration",
    TIME => "Time",
    TEMPERATURE => "Temperature",
    ABSOLUTE_TEMPERATURE => "AbsoluteTemperature",
    ELECTRICAL_CURRENT => "ElectricalCurrent",
    AMOUNT_OF_SUBSTANCE => "AmountOfSubstance",
    LUMINOUS_INTENSITY => "LuminousIntensity",
    MONEY => "Money",
    AREA => "Area",
    VOLUME => "Volume",
    SPEED => "Speed",
    ACCELERATION => "Acceleration",
    JERK => "Jerk",
    FREQUENCY => "Frequency",
    FORCE => "Force",
    ENERGY => "Energy",
    TORQUE => "Torque",
    POWER => "Power",
    PRESSURE => "Pressure",
    DENSITY => "Density",
    ELECTRICAL_CHARGE => "ElectricalCharge",
    ELECTRICAL_POTENTIAL => "ElectricalPotential",
    ELECTRICAL_RESISTANCE => "ElectricalResistance",
}

/// How a catalog unit converts to the standard unit of its family.
#[derive(Clone, Copy)]
enum Conversion {
    Standard,
    Linear(f64),
    OffsetLinear(f64, f64),
    Grade(f64),
}

impl Conversion {
    fn scale(self) -> Result<Scale, ConstructionError> {
        match self {
            Self::Standard => Ok(Scale::IDENTITY),
            Self::Linear(factor) => Scale::linear(factor),
            Self::OffsetLinear(ratio, offset) => Scale::offset_linear(ratio, offset),
            Self::Grade(factor) => Scale::grade(factor),
        }
    }
}

struct UnitInfo {
    id: &'static str,
    name: &'static str,
    abbreviations: &'static [&'static str],
    display: Option<&'static str>,
    system: UnitSystem,
    conversion: Conversion,
    prefixes: SiPrefixes,
}

struct FamilyInfo {
    name: &'static str,
    signature: &'static str,
    relative_family: Option<&'static str>,
    units: Vec<UnitInfo>,
}

const fn unit(
    id: &'static str,
    name: &'static str,
    system: UnitSystem,
    conversion: Conversion,
) -> UnitInfo {
    UnitInfo {
        id,
        name,
        abbreviations: &[],
        display: None,
        system,
        conversion,
        prefixes: SiPrefixes::None,
    }
}

impl UnitInfo {
    const fn abbreviations(mut self, abbreviations: &'static [&'static str]) -> Self {
        self.abbreviations = abbreviations;
        self
    }

    const fn display(mut self, display: &'static str) -> Self {
        self.display = Some(display);
        self
    }

    const fn prefixes(mut self, prefixes: SiPrefixes) -> Self {
        self.prefixes = prefixes;
        self
    }
}

/// Registers every built-in family with the registry.
///
/// # Errors
///
/// Returns the first [`ConstructionError`] raised while registering.
pub fn register_standard_units(registry: &UnitRegistry) -> Result<(), ConstructionError> {
    for family in families() {
        register_family(registry, &family)?;
    }
    Ok(())
}

fn register_family(registry: &UnitRegistry, family: &FamilyInfo) -> Result<(), ConstructionError> {
    let base = UnitBase::new(family.name, family.signature)?;
    let relative_base = family
        .relative_family
        .and_then(|relative| registry.base(relative));

    for info in &family.units {
        let mut builder = UnitBuilder::new(info.id, info.name)
            .abbreviations(info.abbreviations.iter().copied())
            .unit_system(info.system)
            .scale(info.conversion.scale()?)
            .si_prefixes(info.prefixes)
            .base(&base);
        if let Some(display) = info.display {
            builder = builder.display_abbreviation(display);
        }
        if family.relative_family.is_some() {
            let relative = relative_base
                .as_ref()
                .and_then(|relative_base| relative_base.lookup_by_id(info.id))
                .ok_or_else(|| ConstructionError::MissingRelativeUnit {
                    id: info.id.to_string(),
                })?;
            builder = builder.relative_unit(&relative);
        }
        builder.register()?;
    }

    registry.register(base)?;
    Ok(())
}

#[expect(clippy::too_many_lines, reason = "this is a list of builtin units")]
#[expect(clippy::unreadable_literal, reason = "this is a list of builtin units")]
fn families() -> Vec<FamilyInfo> {
    use Conversion::{Grade, Linear, OffsetLinear, Standard};
    use UnitSystem::{Cgs, Imperial, Other, SiAccepted, SiBase, SiDerived, UsCustomary};

    const FOOT: f64 = 0.3048;
    const POUND: f64 = 0.45359237;
    const STANDARD_GRAVITY: f64 = 9.80665;
    const POUND_FORCE: f64 = POUND * STANDARD_GRAVITY;

    vec![
        // === BASE QUANTITIES ===
        FamilyInfo {
            name: quantity::DIMENSIONLESS,
            signature: "1",
            relative_family: None,
            units: vec![unit("1", "unit", SiDerived, Standard)],
        },
        FamilyInfo {
            name: quantity::ANGLE,
            signature: "1",
            relative_family: None,
            units: vec![
                unit("rad", "radian", SiDerived, Standard).prefixes(SiPrefixes::Unit),
                unit("deg", "degree", SiAccepted, Linear(PI / 180.0))
                    .abbreviations(&["deg", "°"])
                    .display("°"),
                unit("arcmin", "arcminute", SiAccepted, Linear(PI / 10_800.0))
                    .abbreviations(&["arcmin", "'"]),
                unit("arcsec", "arcsecond", SiAccepted, Linear(PI / 648_000.0))
                    .abbreviations(&["arcsec", "\""]),
                unit("%", "percent grade", Other, Grade(0.01)),
            ],
        },
        FamilyInfo {
            name: quantity::LENGTH,
            signature: "m",
            relative_family: None,
            units: vec![
                unit("m", "meter", SiBase, Standard).prefixes(SiPrefixes::Unit),
                unit("in", "inch", Imperial, Linear(0.0254)),
                unit("ft", "foot", Imperial, Linear(FOOT)),
                unit("yd", "yard", Imperial, Linear(0.9144)),
                unit("mi", "mile", Imperial, Linear(1609.344)),
                unit("NM", "nautical mile", Other, Linear(1852.0)).abbreviations(&["NM", "nmi"]),
                unit("AU", "astronomical unit", SiAccepted, Linear(149_597_870_700.0))
                    .abbreviations(&["AU", "au"]),
                unit("ly", "light year", Other, Linear(9_460_730_472_580_800.0)),
            ],
        },
        FamilyInfo {
            name: quantity::POSITION,
            signature: "m",
            relative_family: Some(quantity::LENGTH),
            units: vec![
                unit("m", "meter", SiBase, Standard).prefixes(SiPrefixes::Unit),
                unit("in", "inch", Imperial, Linear(0.0254)),
                unit("ft", "foot", Imperial, Linear(FOOT)),
                unit("yd", "yard", Imperial, Linear(0.9144)),
                unit("mi", "mile", Imperial, Linear(1609.344)),
            ],
        },
        FamilyInfo {
            name: quantity::MASS,
            signature: "kg",
            relative_family: None,
            units: vec![
                unit("kg", "kilogram", SiBase, Standard).prefixes(SiPrefixes::Kilo),
                unit("g", "gram", SiDerived, Linear(1e-3)),
                unit("t", "tonne", SiAccepted, Linear(1000.0)),
                unit("lb", "pound", Imperial, Linear(POUND)),
                unit("oz", "ounce", Imperial, Linear(POUND / 16.0)),
                unit("Da", "dalton", SiAccepted, Linear(1.660_539_066_60e-27))
                    .abbreviations(&["Da", "u"]),
            ],
        },
        FamilyInfo {
            name: quantity::DURATION,
            signature: "s",
            relative_family: None,
            units: vec![
                unit("s", "second", SiBase, Standard).prefixes(SiPrefixes::Unit),
                unit("min", "minute", SiAccepted, Linear(60.0)),
                unit("h", "hour", SiAccepted, Linear(3600.0)).abbreviations(&["h", "hr"]),
                unit("day", "day", SiAccepted, Linear(86_400.0)).abbreviations(&["day", "d"]),
                unit("wk", "week", Other, Linear(604_800.0)),
            ],
        },
        FamilyInfo {
            name: quantity::TIME,
            signature: "s",
            relative_family: Some(quantity::DURATION),
            units: vec![
                unit("s", "second", SiBase, Standard).prefixes(SiPrefixes::Unit),
                unit("min", "minute", SiAccepted, Linear(60.0)),
                unit("h", "hour", SiAccepted, Linear(3600.0)),
                unit("day", "day", SiAccepted, Linear(86_400.0)),
            ],
        },
        FamilyInfo {
            name: quantity::TEMPERATURE,
            signature: "K",
            relative_family: None,
            units: vec![
                unit("K", "kelvin", SiBase, Standard).prefixes(SiPrefixes::Unit),
                unit("degC", "degree Celsius", SiDerived, Linear(1.0))
                    .abbreviations(&["degC", "°C"])
                    .display("°C"),
                unit("degF", "degree Fahrenheit", Imperial, Linear(5.0 / 9.0))
                    .abbreviations(&["degF", "°F"])
                    .display("°F"),
                unit("degR", "degree Rankine", Imperial, Linear(5.0 / 9.0))
                    .abbreviations(&["degR", "°R"])
                    .display("°R"),
            ],
        },
        FamilyInfo {
            name: quantity::ABSOLUTE_TEMPERATURE,
            signature: "K",
            relative_family: Some(quantity::TEMPERATURE),
            units: vec![
                unit("K", "kelvin", SiBase, Standard),
                unit("degC", "degree Celsius", SiDerived, OffsetLinear(1.0, 273.15))
                    .abbreviations(&["degC", "°C"])
                    .display("°C"),
                unit(
                    "degF",
                    "degree Fahrenheit",
                    Imperial,
                    OffsetLinear(5.0 / 9.0, 459.67),
                )
                .abbreviations(&["degF", "°F"])
                .display("°F"),
                unit("degR", "degree Rankine", Imperial, Linear(5.0 / 9.0))
                    .abbreviations(&["degR", "°R"])
                    .display("°R"),
            ],
        },
        FamilyInfo {
            name: quantity::ELECTRICAL_CURRENT,
            signature: "A",
            relative_family: None,
            units: vec![unit("A", "ampere", SiBase, Standard).prefixes(SiPrefixes::Unit)],
        },
        FamilyInfo {
            name: quantity::AMOUNT_OF_SUBSTANCE,
            signature: "mol",
            relative_family: None,
            units: vec![unit("mol", "mole", SiBase, Standard).prefixes(SiPrefixes::Unit)],
        },
        FamilyInfo {
            name: quantity::LUMINOUS_INTENSITY,
            signature: "cd",
            relative_family: None,
            units: vec![unit("cd", "candela", SiBase, Standard)],
        },
        FamilyInfo {
            name: quantity::MONEY,
            signature: "$",
            relative_family: None,
            units: vec![unit("USD", "US dollar", SiBase, Standard).abbreviations(&["$", "USD"])],
        },
        // === DERIVED QUANTITIES ===
        FamilyInfo {
            name: quantity::AREA,
            signature: "m2",
            relative_family: None,
            units: vec![
                unit("m2", "square meter", SiDerived, Standard).abbreviations(&["m2", "m^2"]),
                unit("km2", "square kilometer", SiDerived, Linear(1e6)),
                unit("cm2", "square centimeter", SiDerived, Linear(1e-4)),
                unit("mm2", "square millimeter", SiDerived, Linear(1e-6)),
                unit("ha", "hectare", SiAccepted, Linear(1e4)),
                unit("ac", "acre", Imperial, Linear(4046.856_422_4)),
                unit("ft2", "square foot", Imperial, Linear(FOOT * FOOT)),
            ],
        },
        FamilyInfo {
            name: quantity::VOLUME,
            signature: "m3",
            relative_family: None,
            units: vec![
                unit("m3", "cubic meter", SiDerived, Standard).abbreviations(&["m3", "m^3"]),
                unit("L", "liter", SiAccepted, Linear(1e-3))
                    .abbreviations(&["L", "l"])
                    .prefixes(SiPrefixes::Unit),
                unit("cm3", "cubic centimeter", SiDerived, Linear(1e-6)),
                unit("gal", "US gallon", UsCustomary, Linear(3.785_411_784e-3)),
                unit("ft3", "cubic foot", Imperial, Linear(FOOT * FOOT * FOOT)),
            ],
        },
        FamilyInfo {
            name: quantity::SPEED,
            signature: "m/s",
            relative_family: None,
            units: vec![
                unit("m/s", "meter per second", SiDerived, Standard),
                unit("km/h", "kilometer per hour", SiDerived, Linear(1.0 / 3.6)),
                unit("mi/h", "mile per hour", Imperial, Linear(0.44704))
                    .abbreviations(&["mi/h", "mph"]),
                unit("kt", "knot", Other, Linear(1852.0 / 3600.0)),
                unit("ft/s", "foot per second", Imperial, Linear(FOOT)),
            ],
        },
        FamilyInfo {
            name: quantity::ACCELERATION,
            signature: "m/s2",
            relative_family: None,
            units: vec![
                unit("m/s2", "meter per second squared", SiDerived, Standard),
                unit("g0", "standard gravity", Other, Linear(STANDARD_GRAVITY)),
                unit("ft/s2", "foot per second squared", Imperial, Linear(FOOT)),
                unit("Gal", "gal", Cgs, Linear(0.01)),
            ],
        },
        FamilyInfo {
            name: quantity::JERK,
            signature: "m/s3",
            relative_family: None,
            units: vec![unit("m/s3", "meter per second cubed", SiDerived, Standard)],
        },
        FamilyInfo {
            name: quantity::FREQUENCY,
            signature: "1/s",
            relative_family: None,
            units: vec![
                unit("Hz", "hertz", SiDerived, Standard).prefixes(SiPrefixes::Unit),
                unit("rpm", "revolutions per minute", Other, Linear(1.0 / 60.0)),
            ],
        },
        FamilyInfo {
            name: quantity::FORCE,
            signature: "kgm/s2",
            relative_family: None,
            units: vec![
                unit("N", "newton", SiDerived, Standard).prefixes(SiPrefixes::Unit),
                unit("dyn", "dyne", Cgs, Linear(1e-5)),
                unit("lbf", "pound force", Imperial, Linear(POUND_FORCE)),
                unit("kgf", "kilogram force", Other, Linear(STANDARD_GRAVITY)),
            ],
        },
        FamilyInfo {
            name: quantity::ENERGY,
            signature: "kgm2/s2",
            relative_family: None,
            units: vec![
                unit("J", "joule", SiDerived, Standard).prefixes(SiPrefixes::Unit),
                unit("Wh", "watt hour", SiAccepted, Linear(3600.0)).prefixes(SiPrefixes::Unit),
                unit("cal", "calorie", Other, Linear(4.184)),
                unit("eV", "electronvolt", SiAccepted, Linear(1.602_176_634e-19)),
                unit("erg", "erg", Cgs, Linear(1e-7)),
                unit("BTU", "British thermal unit", Imperial, Linear(1055.055_852_62)),
            ],
        },
        FamilyInfo {
            name: quantity::TORQUE,
            signature: "kgm2/s2",
            relative_family: None,
            units: vec![
                unit("N.m", "newton meter", SiDerived, Standard).abbreviations(&["N.m", "Nm"]),
                unit("lbf.ft", "pound foot", Imperial, Linear(POUND_FORCE * FOOT)),
            ],
        },
        FamilyInfo {
            name: quantity::POWER,
            signature: "kgm2/s3",
            relative_family: None,
            units: vec![
                unit("W", "watt", SiDerived, Standard).prefixes(SiPrefixes::Unit),
                unit("hp", "horsepower", Imperial, Linear(745.699_871_582_270_2)),
            ],
        },
        FamilyInfo {
            name: quantity::PRESSURE,
            signature: "kg/ms2",
            relative_family: None,
            units: vec![
                unit("Pa", "pascal", SiDerived, Standard).prefixes(SiPrefixes::Unit),
                unit("bar", "bar", Other, Linear(1e5)),
                unit("atm", "standard atmosphere", Other, Linear(101_325.0)),
                unit("psi", "pound per square inch", Imperial, Linear(6894.757_293_168)),
                unit("mmHg", "millimeter of mercury", Other, Linear(133.322_387_415)),
            ],
        },
        FamilyInfo {
            name: quantity::DENSITY,
            signature: "kg/m3",
            relative_family: None,
            units: vec![
                unit("kg/m3", "kilogram per cubic meter", SiDerived, Standard),
                unit("g/cm3", "gram per cubic centimeter", SiDerived, Linear(1000.0)),
            ],
        },
        FamilyInfo {
            name: quantity::ELECTRICAL_CHARGE,
            signature: "sA",
            relative_family: None,
            units: vec![
                unit("C", "coulomb", SiDerived, Standard).prefixes(SiPrefixes::Unit),
                unit("Ah", "ampere hour", Other, Linear(3600.0)),
            ],
        },
        FamilyInfo {
            name: quantity::ELECTRICAL_POTENTIAL,
            signature: "kgm2/s3A",
            relative_family: None,
            units: vec![unit("V", "volt", SiDerived, Standard).prefixes(SiPrefixes::Unit)],
        },
        FamilyInfo {
            name: quantity::ELECTRICAL_RESISTANCE,
            signature: "kgm2/s3A2",
            relative_family: None,
            units: vec![
                unit("ohm", "ohm", SiDerived, Standard)
                    .abbreviations(&["ohm", "Ω"])
                    .display("Ω")
                    .prefixes(SiPrefixes::Unit),
            ],
        },
    ]
}
