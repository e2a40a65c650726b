//! Standard configuration keys for surfaces, shading and layer styles.

use crate::config::{ConfigKey, ConfigValue, ValueKind, XyKeyPair};
use compact_str::CompactString;

fn bool_key(name: &str, long: &str, default: bool) -> ConfigKey {
    ConfigKey::new(name, long, ValueKind::Bool, ConfigValue::Bool(default))
}

fn int_key(name: &str, long: &str, default: i64) -> ConfigKey {
    ConfigKey::new(name, long, ValueKind::Int, ConfigValue::Int(default))
}

fn float_key(name: &str, long: &str, default: Option<f64>) -> ConfigKey {
    let default = default.map_or(ConfigValue::Null, ConfigValue::float);
    ConfigKey::new(name, long, ValueKind::Float, default)
}

fn text_key(name: &str, long: &str) -> ConfigKey {
    ConfigKey::new(name, long, ValueKind::Text, ConfigValue::Null)
}

fn color_key(name: &str, long: &str, default: &str) -> ConfigKey {
    ConfigKey::new(name, long, ValueKind::Color, ConfigValue::text(default))
}

fn choice_key(name: &str, long: &str, options: &[&str], default: &str) -> ConfigKey {
    let options = options.iter().copied().map(CompactString::from).collect();
    ConfigKey::new(
        name,
        long,
        ValueKind::Choice(options),
        ConfigValue::text(default),
    )
}

// Axis families

fn axis_log(axis: &str) -> ConfigKey {
    bool_key(&format!("{axis}log"), "Log Scale", false)
}

fn axis_flip(axis: &str) -> ConfigKey {
    bool_key(&format!("{axis}flip"), "Flip Axis", false)
}

fn axis_label(axis: &str) -> ConfigKey {
    text_key(&format!("{axis}label"), "Axis Label")
}

fn axis_crowd(axis: &str) -> ConfigKey {
    float_key(&format!("{axis}crowd"), "Tick Crowding", Some(1.0))
}

pub const LOG_PAIR: XyKeyPair = XyKeyPair::new(axis_log);
pub const FLIP_PAIR: XyKeyPair = XyKeyPair::new(axis_flip);
pub const LABEL_PAIR: XyKeyPair = XyKeyPair::new(axis_label);
pub const CROWD_PAIR: XyKeyPair = XyKeyPair::new(axis_crowd);

pub fn axis_keys(axis: &str) -> Vec<ConfigKey> {
    vec![axis_log(axis), axis_flip(axis), axis_label(axis)]
}

pub fn axis_range(axis: &str) -> Vec<ConfigKey> {
    vec![
        float_key(&format!("{axis}min"), "Minimum", None),
        float_key(&format!("{axis}max"), "Maximum", None),
    ]
}

pub fn grid(default: bool) -> ConfigKey {
    bool_key("grid", "Draw Grid", default)
}

pub fn minor() -> ConfigKey {
    bool_key("minor", "Minor Ticks", true)
}

pub fn grid_color() -> ConfigKey {
    color_key("gridcolor", "Grid Color", "light_grey")
}

pub fn label_color() -> ConfigKey {
    color_key("labelcolor", "Label Color", "black")
}

pub fn crowd() -> ConfigKey {
    float_key("crowd", "Grid Crowding", Some(1.0))
}

// Sky

pub fn viewsys() -> ConfigKey {
    ConfigKey::new(
        "viewsys",
        "View Sky System",
        ValueKind::SkySys {
            view_comparison: false,
        },
        ConfigValue::Null,
    )
}

pub fn datasys() -> ConfigKey {
    ConfigKey::new(
        "datasys",
        "Data Sky System",
        ValueKind::SkySys {
            view_comparison: true,
        },
        ConfigValue::Null,
    )
}

pub fn sky_profile() -> Vec<ConfigKey> {
    vec![
        choice_key(
            "projection",
            "Projection",
            &["sin", "aitoff", "aitoff0", "car", "car0"],
            "sin",
        ),
        viewsys(),
        bool_key("reflectlon", "Reflect Longitude", true),
        grid(true),
        bool_key("scalebar", "Scale Bar", true),
        choice_key(
            "labelpos",
            "Label Position",
            &["auto", "external", "internal", "basic", "none"],
            "auto",
        ),
        bool_key("sex", "Sexagesimal", true),
        crowd(),
        grid_color(),
        label_color(),
        bool_key("gridaa", "Antialiased Grid", false),
        choice_key("texttype", "Text Syntax", &["plain", "antialias", "latex"], "plain"),
    ]
}

pub fn sky_aspect() -> Vec<ConfigKey> {
    vec![
        float_key("clon", "Center Longitude", None),
        float_key("clat", "Center Latitude", None),
        float_key("radius", "Radius", None),
    ]
}

// Plane and time

pub fn plane_profile() -> Vec<ConfigKey> {
    let mut keys = axis_keys("x");
    keys.extend(axis_keys("y"));
    keys.extend([
        grid(false),
        axis_crowd("x"),
        axis_crowd("y"),
        minor(),
        grid_color(),
        label_color(),
    ]);
    keys
}

pub fn plane_aspect() -> Vec<ConfigKey> {
    let mut keys = axis_range("x");
    keys.extend(axis_range("y"));
    keys
}

pub fn time_profile() -> Vec<ConfigKey> {
    let mut keys = vec![
        choice_key(
            "tformat",
            "Time Format",
            &["iso-8601", "mjd", "decimal-year", "unix"],
            "iso-8601",
        ),
        text_key("tlabel", "Time Label"),
    ];
    keys.extend(axis_keys("y"));
    keys.extend([grid(false), minor(), grid_color()]);
    keys
}

pub fn time_aspect() -> Vec<ConfigKey> {
    let mut keys = axis_range("t");
    keys.extend(axis_range("y"));
    keys
}

// Cube and sphere

fn view_angles() -> Vec<ConfigKey> {
    vec![
        float_key("phi", "Rotation Phi", Some(30.0)),
        float_key("theta", "Rotation Theta", Some(-15.0)),
        float_key("psi", "Rotation Psi", Some(0.0)),
        float_key("zoom", "Zoom", Some(1.0)),
    ]
}

pub fn cube_profile() -> Vec<ConfigKey> {
    let mut keys = axis_keys("x");
    keys.extend(axis_keys("y"));
    keys.extend(axis_keys("z"));
    keys.extend([
        bool_key("forceiso", "Isotropic", false),
        crowd(),
        minor(),
        label_color(),
    ]);
    keys
}

pub fn cube_aspect() -> Vec<ConfigKey> {
    let mut keys = axis_range("x");
    keys.extend(axis_range("y"));
    keys.extend(axis_range("z"));
    keys.extend(view_angles());
    keys
}

pub fn sphere_profile() -> Vec<ConfigKey> {
    vec![crowd(), minor(), label_color()]
}

pub fn sphere_aspect() -> Vec<ConfigKey> {
    let mut keys = vec![
        float_key("cx", "Center X", None),
        float_key("cy", "Center Y", None),
        float_key("cz", "Center Z", None),
        float_key("scale", "Scale", None),
    ];
    keys.extend(view_angles());
    keys
}

// Matrix

pub fn matrix_format() -> ConfigKey {
    choice_key(
        "matrixformat",
        "Matrix Format",
        &["lower", "upper", "full"],
        "lower",
    )
}

pub fn cell_gap() -> ConfigKey {
    int_key("cellgap", "Cell Gap", 4)
}

pub fn matrix_profile() -> Vec<ConfigKey> {
    let mut keys = axis_keys("x");
    keys.extend(axis_keys("y"));
    keys.extend([grid(false), minor(), grid_color()]);
    keys
}

// Shading

pub fn shade_keys() -> Vec<ConfigKey> {
    vec![
        choice_key(
            "auxmap",
            "Shader",
            &["inferno", "viridis", "magma", "greyscale", "rainbow", "heat"],
            "inferno",
        ),
        bool_key("auxflip", "Shader Flip", false),
        choice_key(
            "auxfunc",
            "Shader Scaling",
            &["linear", "log", "sqrt", "square", "histogram"],
            "linear",
        ),
        float_key("auxquant", "Shader Quantization", None),
        color_key("auxnullcolor", "Null Color", "grey"),
        float_key("auxmin", "Shade Minimum", None),
        float_key("auxmax", "Shade Maximum", None),
    ]
}

// Layer styles

pub fn color(default: &str) -> ConfigKey {
    color_key("color", "Color", default)
}

pub fn shape() -> ConfigKey {
    choice_key(
        "shape",
        "Shape",
        &[
            "filled_circle",
            "open_circle",
            "cross",
            "x",
            "open_square",
            "filled_square",
            "open_triangle_up",
            "filled_triangle_up",
        ],
        "filled_circle",
    )
}

pub fn size() -> ConfigKey {
    int_key("size", "Size", 1)
}

pub fn scale() -> ConfigKey {
    float_key("scale", "Scale", Some(1.0))
}

pub fn thick() -> ConfigKey {
    int_key("thick", "Thickness", 1)
}

pub fn dash() -> ConfigKey {
    choice_key("dash", "Dash", &["solid", "dot", "dash", "longdash"], "solid")
}

pub fn opaque() -> ConfigKey {
    float_key("opaque", "Opaque Limit", Some(4.0))
}

pub fn dense_map() -> ConfigKey {
    choice_key(
        "densemap",
        "Density Shader",
        &["inferno", "viridis", "greyscale", "heat"],
        "inferno",
    )
}

pub fn dense_func() -> ConfigKey {
    choice_key("densefunc", "Density Scaling", &["log", "linear", "sqrt"], "log")
}

pub fn font_size() -> ConfigKey {
    int_key("fontsize", "Font Size", 12)
}

pub fn bin_size() -> ConfigKey {
    float_key("binsize", "Bin Size", None)
}

pub fn bar_form() -> ConfigKey {
    choice_key(
        "barform",
        "Bar Form",
        &["filled", "open", "semi_filled", "steps", "spikes"],
        "semi_filled",
    )
}
