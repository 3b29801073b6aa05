//! Input-control dispatch: one table maps every editable field to a pure update function.

use std::fmt;
use std::str::FromStr;

use crate::export::validate_file_name;
use crate::foundation::color::Color;
use crate::foundation::error::{RayburstError, RayburstResult};
use crate::settings::PersistedSettings;

/// An editable settings field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    /// `rayCount`
    RayCount,
    /// `rayColorEven`
    RayColorEven,
    /// `rayColorOdd`
    RayColorOdd,
    /// `centerCoreRadius`
    CenterCoreRadius,
    /// `centerShadeRadius`
    CenterShadeRadius,
    /// `centerColor`
    CenterColor,
    /// `fileName`
    FileName,
    /// `imageWidth`
    ImageWidth,
    /// `imageHeight`
    ImageHeight,
}

type Update = fn(&mut PersistedSettings, &str) -> RayburstResult<()>;

struct FieldEntry {
    field: Field,
    name: &'static str,
    control_id: &'static str,
    update: Update,
}

static FIELD_TABLE: [FieldEntry; 9] = [
    FieldEntry {
        field: Field::RayCount,
        name: "rayCount",
        control_id: "ray-count",
        update: |s, raw| {
            s.params.ray_count = parse_count(raw, "rayCount")?;
            Ok(())
        },
    },
    FieldEntry {
        field: Field::RayColorEven,
        name: "rayColorEven",
        control_id: "ray-color-even",
        update: |s, raw| {
            s.params.ray_color_even = Color::parse(raw)?;
            Ok(())
        },
    },
    FieldEntry {
        field: Field::RayColorOdd,
        name: "rayColorOdd",
        control_id: "ray-color-odd",
        update: |s, raw| {
            s.params.ray_color_odd = Color::parse(raw)?;
            Ok(())
        },
    },
    FieldEntry {
        field: Field::CenterCoreRadius,
        name: "centerCoreRadius",
        control_id: "center-core-radius",
        update: |s, raw| {
            s.params.center_core_radius = parse_fraction(raw, "centerCoreRadius")?;
            Ok(())
        },
    },
    FieldEntry {
        field: Field::CenterShadeRadius,
        name: "centerShadeRadius",
        control_id: "center-shade-radius",
        update: |s, raw| {
            s.params.center_shade_radius = parse_fraction(raw, "centerShadeRadius")?;
            Ok(())
        },
    },
    FieldEntry {
        field: Field::CenterColor,
        name: "centerColor",
        control_id: "center-color",
        update: |s, raw| {
            s.params.center_color = Color::parse(raw)?;
            Ok(())
        },
    },
    FieldEntry {
        field: Field::FileName,
        name: "fileName",
        control_id: "file-name",
        update: |s, raw| {
            validate_file_name(raw)?;
            s.file_name = raw.to_owned();
            Ok(())
        },
    },
    FieldEntry {
        field: Field::ImageWidth,
        name: "imageWidth",
        control_id: "image-width",
        update: |s, raw| {
            s.image_width = parse_count(raw, "imageWidth")?;
            Ok(())
        },
    },
    FieldEntry {
        field: Field::ImageHeight,
        name: "imageHeight",
        control_id: "image-height",
        update: |s, raw| {
            s.image_height = parse_count(raw, "imageHeight")?;
            Ok(())
        },
    },
];

impl Field {
    /// Every field, in table order.
    pub const ALL: [Field; 9] = [
        Field::RayCount,
        Field::RayColorEven,
        Field::RayColorOdd,
        Field::CenterCoreRadius,
        Field::CenterShadeRadius,
        Field::CenterColor,
        Field::FileName,
        Field::ImageWidth,
        Field::ImageHeight,
    ];

    fn entry(self) -> &'static FieldEntry {
        // The table is ordered like the enum.
        &FIELD_TABLE[self as usize]
    }

    /// Settings key, e.g. `rayCount`.
    pub fn name(self) -> &'static str {
        self.entry().name
    }

    /// Control id, e.g. `ray-count`.
    pub fn control_id(self) -> &'static str {
        self.entry().control_id
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = RayburstError;

    /// Accepts the settings key (`rayCount`) or the control id (`ray-count`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        FIELD_TABLE
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(s) || e.control_id.eq_ignore_ascii_case(s))
            .map(|e| e.field)
            .ok_or_else(|| RayburstError::parse(format!("unknown field \"{s}\"")))
    }
}

/// Apply one control edit, returning the updated settings.
///
/// `settings` is left untouched when `raw` is rejected.
pub fn apply(
    settings: &PersistedSettings,
    field: Field,
    raw: &str,
) -> RayburstResult<PersistedSettings> {
    let mut next = settings.clone();
    (field.entry().update)(&mut next, raw)?;
    Ok(next)
}

/// Parse a positive integer the way `parseInt` reads a numeric input: leading digits count,
/// trailing junk is ignored.
fn parse_count(raw: &str, what: &str) -> RayburstResult<u32> {
    let t = raw.trim();
    let t = t.strip_prefix('+').unwrap_or(t);
    let digits: &str = &t[..t.find(|c: char| !c.is_ascii_digit()).unwrap_or(t.len())];
    if digits.is_empty() {
        return Err(RayburstError::parse(format!(
            "{what}: \"{raw}\" is not a number"
        )));
    }
    let n: u32 = digits
        .parse()
        .map_err(|_| RayburstError::parse(format!("{what}: \"{raw}\" is out of range")))?;
    if n == 0 {
        return Err(RayburstError::validation(format!("{what} must be >= 1")));
    }
    Ok(n)
}

fn parse_fraction(raw: &str, what: &str) -> RayburstResult<f64> {
    let v: f64 = raw
        .trim()
        .parse()
        .map_err(|_| RayburstError::parse(format!("{what}: \"{raw}\" is not a number")))?;
    if !v.is_finite() {
        return Err(RayburstError::validation(format!("{what} must be finite")));
    }
    Ok(v)
}

#[cfg(test)]
#[path = "../tests/unit/controls.rs"]
mod tests;
