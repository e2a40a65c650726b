//! Assembly of a [`PlotSpec`] into a grouped [`Command`].

use crate::{
    adjust::ZoneAdjuster,
    command::Command,
    error::{
        AmbiguousSuffixSnafu, Result, SpecCountSnafu, SuffixCountSnafu, UnknownLayerSuffixSnafu,
        ZoneIndexSnafu,
    },
    factor::factor,
    keys, matrix,
    plot::{LayerKind, LayerSpec, PlotSpec, ShadeSpec, TrimmingSpec},
    project::{params, project_entries},
    registry::{PlotFlavor, PlotTypeDef, Registry},
    setting::{add_suffixes, to_groups, Credibility, Entry, ObjectValue, Setting, SettingGroup},
    suffix::{find_prefix_violation, Suffixer},
    table::{arg_quote, FormatRegistry, TableNamer},
};
use snafu::ensure;
use tracing::{debug, warn};

/// Turns plot descriptions into commands.
///
/// Holds no per-plot state; one assembler may serve any number of plots.
pub struct Assembler<'a> {
    registry: &'a Registry,
    formats: &'a FormatRegistry,
    namer: &'a dyn TableNamer,
    zone_suffixer: Suffixer,
    layer_suffixer: Suffixer,
}

impl<'a> Assembler<'a> {
    pub fn new(
        registry: &'a Registry,
        formats: &'a FormatRegistry,
        namer: &'a dyn TableNamer,
    ) -> Self {
        Self {
            registry,
            formats,
            namer,
            zone_suffixer: Suffixer::default_zone(),
            layer_suffixer: Suffixer::default_layer(),
        }
    }

    pub fn with_zone_suffixer(mut self, suffixer: Suffixer) -> Self {
        self.zone_suffixer = suffixer;
        self
    }

    pub fn with_layer_suffixer(mut self, suffixer: Suffixer) -> Self {
        self.layer_suffixer = suffixer;
        self
    }

    pub fn assemble(&self, spec: &PlotSpec) -> Result<Command> {
        let def = self.registry.plot_type(&spec.plot_type)?;
        let nz = spec.zone_count();
        check_spec_count("trimming", spec.trimming_specs.len(), nz)?;
        check_spec_count("shade", spec.shade_specs.len(), nz)?;
        let trim_global = nz > 1 && spec.trimming_specs.len() == 1;
        let shade_global = nz > 1 && spec.shade_specs.len() == 1;
        debug!(
            plot_type = def.name,
            zones = nz,
            layers = spec.layer_specs.len(),
            "assembling plot command"
        );

        let task_settings = task_settings(spec);

        let mut global = project_entries(&spec.global_config, &def.ganger_keys);
        global.push(Entry::Gap);
        if def.flavor == PlotFlavor::Matrix {
            global.extend(matrix::global_settings(
                &spec.global_config,
                &spec.zone_configs,
                &def.profile_keys,
                &def.xy_pairs,
            )?);
        }

        let zkeys = self.suffixes("zone", &self.zone_suffixer, nz)?;
        let adjusters: Vec<ZoneAdjuster> = spec
            .zone_configs
            .iter()
            .enumerate()
            .map(|(iz, zconfig)| {
                let layers: Vec<&LayerSpec> = spec
                    .layer_specs
                    .iter()
                    .filter(|layer| layer.zone == Some(iz))
                    .collect();
                ZoneAdjuster::for_zone(def.flavor, zconfig, &layers)
            })
            .collect();

        let mut zone_lists = Vec::new();
        if def.has_zone_settings(nz) {
            for (iz, zconfig) in spec.zone_configs.iter().enumerate() {
                let mut settings = project_entries(zconfig, &def.profile_keys);
                settings.push(Entry::Gap);
                settings.extend(project_entries(zconfig, &def.aspect_keys));
                settings.push(Entry::Gap);
                if !trim_global {
                    settings.extend(trim_settings(nth_spec(&spec.trimming_specs, iz)));
                }
                if !shade_global {
                    settings.extend(shade_settings(nth_spec(&spec.shade_specs, iz)));
                }
                adjusters[iz].adjust_zone_settings(&mut settings);
                zone_lists.push(settings);
            }
        }
        if trim_global {
            global.extend(trim_settings(nth_spec(&spec.trimming_specs, 0)));
        }
        if shade_global {
            global.extend(shade_settings(nth_spec(&spec.shade_specs, 0)));
        }

        let nl = spec.layer_specs.len();
        let lkeys = self.suffixes("layer", &self.layer_suffixer, nl)?;
        let mut layer_types = Vec::with_capacity(nl);
        let mut layer_lists = Vec::with_capacity(nl);
        let mut leg_keys = Vec::new();
        let mut exclude_legend = false;
        for (il, (layer, lkey)) in spec.layer_specs.iter().zip(&lkeys).enumerate() {
            let mut settings = Vec::new();

            if let Some(iz) = layer.zone {
                ensure!(
                    iz < nz,
                    ZoneIndexSnafu {
                        layer: il,
                        zone: iz,
                        zone_count: nz,
                    }
                );
                settings.push(Entry::Setting(params::ZONE.setting(zkeys[iz].as_str())));
                settings.push(Entry::Gap);
            }

            settings.extend(self.input_table_settings(layer));
            settings.push(Entry::Gap);
            settings.extend(geom_settings(def, layer));
            settings.extend(coord_settings(layer));
            settings.push(Entry::Gap);

            if let LayerKind::ShapeFamily { mode, .. } = &layer.plotter.kind {
                settings.push(Entry::Setting(params::SHADING.setting(mode.as_str())));
            }
            settings.extend(project_entries(&layer.config, &layer.plotter.style_keys));
            settings.extend(project_entries(&layer.config, &def.layer_keys));
            if let Some(iz) = layer.zone {
                adjusters[iz].adjust_layer_settings(layer, &mut settings);
            }
            settings.push(Entry::Gap);

            // Zone-less layers never appear in a legend.
            let legend_trim = layer
                .zone
                .and_then(|iz| nth_spec(&spec.trimming_specs, iz));
            if legend_trim.is_some_and(|trim| trim.legend.is_some()) {
                match &layer.legend_label {
                    Some(label) => {
                        settings.push(Entry::Setting(params::LEGLABEL.setting(label.as_str())));
                        leg_keys.push(lkey.clone());
                    },
                    None => exclude_legend = true,
                }
                settings.push(Entry::Gap);
            }

            layer_types.push(layer.plotter.layer_type().to_owned());
            layer_lists.push(settings);
        }

        let (zone_lists, common_zone) = factor(zone_lists);
        let (layer_lists, common_layer) = factor(layer_lists);
        debug!(
            common_zone = common_zone.len(),
            common_layer = common_layer.len(),
            "factored shared settings"
        );

        let mut trailer = Vec::new();
        if let Some(seq) = sequence_setting(spec.layer_order.as_deref(), &lkeys)? {
            trailer.push(Entry::Setting(seq));
        }
        if exclude_legend {
            trailer.push(Entry::Setting(params::LEGSEQ.setting(leg_keys.join(","))));
        }
        trailer.push(Entry::Gap);
        trailer.push(Entry::Setting(params::OUT.setting("")));

        let mut groups: Vec<SettingGroup> = Vec::new();
        groups.extend(to_groups(1, task_settings));
        groups.extend(to_groups(1, global));
        groups.extend(to_groups(1, common_zone.into_iter().map(Entry::Setting)));
        for (zkey, settings) in zkeys.iter().zip(zone_lists) {
            groups.extend(to_groups(1, add_suffixes(settings, zkey)));
        }
        groups.extend(to_groups(1, common_layer.into_iter().map(Entry::Setting)));
        for ((lkey, ltype), settings) in lkeys.iter().zip(layer_types).zip(layer_lists) {
            groups.push(SettingGroup::new(
                1,
                vec![params::LAYER.suffixed(lkey, ltype)],
            ));
            groups.extend(to_groups(2, add_suffixes(settings, lkey)));
        }
        groups.extend(to_groups(1, trailer));

        Ok(Command::new(def.task_name, groups))
    }

    fn suffixes(&self, kind: &'static str, suffixer: &Suffixer, n: usize) -> Result<Vec<String>> {
        let suffixes = suffixer.create_suffixes(n);
        ensure!(
            suffixes.len() == n,
            SuffixCountSnafu {
                kind,
                expected: n,
                actual: suffixes.len(),
            }
        );
        if let Some((shorter, longer)) = find_prefix_violation(&suffixes) {
            return AmbiguousSuffixSnafu {
                kind,
                shorter,
                longer,
            }
            .fail();
        }
        Ok(suffixes)
    }

    fn input_table_settings(&self, layer: &LayerSpec) -> Vec<Entry> {
        let Some(table) = &layer.table else {
            return Vec::new();
        };
        let mut settings = Vec::new();

        let naming = self.namer.name_table(table);
        if naming.credibility == Credibility::No {
            warn!(table = %table.label, "table has no reloadable name");
        }
        settings.push(Entry::Setting(
            params::IN
                .setting(naming.value)
                .with_object(ObjectValue::new(table.clone()))
                .with_credibility(naming.credibility),
        ));

        if naming.credibility != Credibility::No {
            let format = self.namer.table_format(table);
            let setting = match format.as_deref() {
                Some(fmt) if self.formats.is_auto_detected(fmt) => {
                    params::IFMT.setting(params::AUTO_FORMAT)
                },
                Some(fmt) if self.formats.is_known(fmt) => params::IFMT.setting(fmt),
                _ => params::IFMT
                    .setting(params::AUTO_FORMAT)
                    .with_credibility(Credibility::Maybe),
            };
            settings.push(Entry::Setting(setting));
        }

        if let Some(select) = &layer.select {
            settings.push(Entry::Setting(
                params::ICMD
                    .setting(format!("select {}", arg_quote(&select.value)))
                    .with_credibility(select.credibility),
            ));
        }
        settings
    }
}

fn check_spec_count(what: &'static str, actual: usize, zone_count: usize) -> Result<()> {
    ensure!(
        actual <= 1 || actual == zone_count,
        SpecCountSnafu {
            what,
            actual,
            zone_count,
        }
    );
    Ok(())
}

fn nth_spec<T>(specs: &[Option<T>], index: usize) -> Option<&T> {
    specs.get(index).and_then(Option::as_ref)
}

fn task_settings(spec: &PlotSpec) -> Vec<Entry> {
    let mut settings = Vec::new();
    if let Some(size) = spec.ext_size {
        settings.push(Entry::Setting(params::XPIX.setting(size.width.to_string())));
        settings.push(Entry::Setting(params::YPIX.setting(size.height.to_string())));
    }
    settings.push(Entry::Setting(
        params::INSETS.setting(spec.padding.to_param_text()),
    ));
    settings
}

fn trim_settings(trim: Option<&TrimmingSpec>) -> Vec<Entry> {
    let Some(trim) = trim else {
        return Vec::new();
    };
    let mut settings = vec![
        Entry::Setting(params::TITLE.setting(trim.title.clone().unwrap_or_default())),
        Entry::Setting(params::LEGEND.setting(trim.legend.is_some().to_string())),
    ];
    if let Some(legend) = &trim.legend {
        let position = legend
            .position
            .map(|[x, y]| format!("{x},{y}"))
            .unwrap_or_default();
        settings.extend([
            Entry::Setting(params::LEGBORDER.setting(legend.border.to_string())),
            Entry::Setting(params::LEGOPAQUE.setting(legend.opaque.to_string())),
            Entry::Setting(params::LEGPOS.setting(position)),
        ]);
    }
    settings.push(Entry::Gap);
    settings
}

fn shade_settings(shade: Option<&ShadeSpec>) -> Vec<Entry> {
    let Some(shade) = shade else {
        return Vec::new();
    };
    let mut settings = project_entries(&shade.config, &keys::shade_keys());
    settings.push(Entry::Gap);
    settings.push(Entry::Setting(
        params::AUXVISIBLE.setting(shade.visible.to_string()),
    ));
    if shade.visible {
        settings.push(Entry::Setting(
            params::AUXLABEL.setting(shade.label.clone().unwrap_or_default()),
        ));
        settings.push(Entry::Setting(
            params::AUXCROWD.setting(shade.crowding.to_string()),
        ));
    }
    settings.push(Entry::Gap);
    settings
}

fn geom_settings(def: &PlotTypeDef, layer: &LayerSpec) -> Vec<Entry> {
    match (def.geom_default, &layer.data_geom) {
        (Some(default), Some(geom)) => vec![Entry::Setting(Setting::new(
            params::GEOM.name(),
            geom.as_str(),
            Some(default.to_owned()),
        ))],
        _ => Vec::new(),
    }
}

fn coord_settings(layer: &LayerSpec) -> Vec<Entry> {
    let mut settings = Vec::new();
    for coord in &layer.coords {
        settings.push(Entry::Setting(Setting::new(
            coord.input_name.as_str(),
            coord.value_expr.as_str(),
            None,
        )));
        if let Some(mapper) = &coord.domain_mapper {
            settings.push(Entry::Setting(Setting::new(
                format!("{}{}", coord.input_name, params::DOMAIN_MAPPER_SUFFIX),
                mapper.as_str(),
                coord.default_domain_mapper.clone(),
            )));
        }
    }
    settings
}

/// The `seq` setting: natural order marked as default, or an explicit
/// order validated against the layer suffixes.
fn sequence_setting(order: Option<&[String]>, lkeys: &[String]) -> Result<Option<Setting>> {
    let natural = lkeys.join(",");
    match order {
        Some(order) => {
            if let Some(unknown) = order.iter().find(|suffix| !lkeys.contains(*suffix)) {
                return UnknownLayerSuffixSnafu {
                    suffix: unknown.as_str(),
                    known: lkeys.join(", "),
                }
                .fail();
            }
            let setting = params::SEQ
                .setting(order.join(","))
                .reset_default(Some(natural));
            Ok(Some(setting))
        },
        None if lkeys.len() > 1 => Ok(Some(params::SEQ.setting(natural).as_default())),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{ConfigMap, ConfigValue},
        error::Error,
        format::TextFormatter,
        plot::{CoordSpec, LegendSpec},
        table::{CredibleString, LabelNamer, LocationNamer, TableRef},
    };

    fn assemble(spec: &PlotSpec) -> Result<Command> {
        Assembler::new(Registry::standard(), FormatRegistry::standard(), &LocationNamer)
            .assemble(spec)
    }

    fn mark(color: &str, size: i64) -> LayerSpec {
        let plotter = Registry::standard().plotter("mark", Some("flat")).unwrap();
        let mut layer = LayerSpec::new(plotter);
        layer.zone = Some(0);
        layer.table = Some(TableRef::new("cat").with_location("cat.fits"));
        layer.coords = vec![CoordSpec::new("x", "RA"), CoordSpec::new("y", "DEC")];
        layer.config = ConfigMap::new()
            .with(&keys::color("red"), ConfigValue::text(color))
            .with(&keys::size(), ConfigValue::Int(size));
        layer
    }

    fn plane(layers: Vec<LayerSpec>) -> PlotSpec {
        PlotSpec {
            zone_configs: vec![ConfigMap::new()],
            layer_specs: layers,
            ..PlotSpec::new("plane")
        }
    }

    fn sky_layer(datasys: &str) -> LayerSpec {
        let mut layer = mark("blue", 2);
        layer.coords = vec![CoordSpec::new("lon", "RA"), CoordSpec::new("lat", "DEC")];
        layer
            .config
            .put(&keys::datasys(), ConfigValue::text(datasys));
        layer
    }

    fn sky(layers: Vec<LayerSpec>) -> PlotSpec {
        PlotSpec {
            zone_configs: vec![ConfigMap::new().with(&keys::viewsys(), ConfigValue::text("fk5"))],
            layer_specs: layers,
            ..PlotSpec::new("sky")
        }
    }

    fn value<'c>(command: &'c Command, key: &str) -> Option<&'c str> {
        command.get(key).map(Setting::value)
    }

    #[test]
    fn shared_layer_settings_are_factored() {
        let command = assemble(&plane(vec![mark("blue", 3), mark("blue", 5)])).unwrap();

        assert_eq!(command.task_name(), "plot2plane");
        assert_eq!(value(&command, "color"), Some("blue"));
        assert_eq!(value(&command, "in"), Some("cat.fits"));
        assert_eq!(value(&command, "size_1"), Some("3"));
        assert_eq!(value(&command, "size_2"), Some("5"));
        assert!(command.get("color_1").is_none());
        assert!(command.get("size").is_none());

        let text = TextFormatter::default().format(&command);
        assert_eq!(
            text,
            "stilts plot2plane \\\n   in=cat.fits x=RA y=DEC shading=flat color=blue \\\n   layer_1=mark \\\n      size_1=3 \\\n   layer_2=mark \\\n      size_2=5"
        );
    }

    #[test]
    fn groups_follow_scope_order() {
        let command = assemble(&plane(vec![mark("blue", 3), mark("blue", 5)])).unwrap();
        let groups = command.groups();

        assert_eq!(groups[0].settings()[0].key(), "insets");
        let layer_group = groups
            .iter()
            .position(|g| g.settings()[0].key() == "layer_1")
            .unwrap();
        assert_eq!(groups[layer_group].level(), 1);
        assert_eq!(groups[layer_group].settings().len(), 1);
        assert_eq!(groups[layer_group + 1].level(), 2);
        assert_eq!(groups[layer_group + 1].settings()[0].key(), "size_1");

        let last = groups.last().unwrap();
        assert_eq!(last.settings()[0].key(), "out");
        let seq = command.get("seq").unwrap();
        assert_eq!(seq.value(), "_1,_2");
        assert!(seq.is_default_value());
    }

    #[test]
    fn single_layer_has_no_sequence() {
        let command = assemble(&plane(vec![mark("blue", 3)])).unwrap();
        assert!(command.get("seq").is_none());
        assert_eq!(value(&command, "color_1"), Some("blue"));
    }

    #[test]
    fn custom_layer_suffixes() {
        let layers = (0..11).map(|i| mark("blue", i)).collect();
        let command = Assembler::new(Registry::standard(), FormatRegistry::standard(), &LocationNamer)
            .with_layer_suffixer(Suffixer::numeric("-", true))
            .assemble(&plane(layers))
            .unwrap();

        assert_eq!(value(&command, "layer-01"), Some("mark"));
        assert_eq!(value(&command, "size-11"), Some("10"));
        assert_eq!(
            value(&command, "seq"),
            Some("-01,-02,-03,-04,-05,-06,-07,-08,-09,-10,-11")
        );
    }

    #[test]
    fn sky_view_system_hidden_while_layers_agree() {
        let command = assemble(&sky(vec![sky_layer("fk5")])).unwrap();
        let viewsys = command.get("viewsys").unwrap();
        assert_eq!(viewsys.value(), "fk5");
        assert!(viewsys.is_default_value());
        assert!(command.get("datasys_1").unwrap().is_default_value());

        let text = TextFormatter::default().format(&command);
        assert!(!text.contains("viewsys"));
        assert!(!text.contains("datasys"));
    }

    #[test]
    fn sky_view_system_shown_once_a_layer_differs() {
        let command = assemble(&sky(vec![sky_layer("fk5"), sky_layer("galactic")])).unwrap();
        let viewsys = command.get("viewsys").unwrap();
        assert_eq!(viewsys.default_value(), Some(""));
        assert!(!viewsys.is_default_value());

        let text = TextFormatter::default().format(&command);
        assert!(text.contains("viewsys=fk5"));
        assert!(text.contains("datasys_1=fk5"));
        assert!(text.contains("datasys_2=galactic"));
    }

    #[test]
    fn explicit_layer_order() {
        let mut spec = plane(vec![mark("blue", 3), mark("blue", 5)]);
        spec.layer_order = Some(vec!["_2".into(), "_1".into()]);
        let command = assemble(&spec).unwrap();
        let seq = command.get("seq").unwrap();
        assert_eq!(seq.value(), "_2,_1");
        assert!(!seq.is_default_value());
    }

    #[test]
    fn layer_order_with_unknown_suffix_fails() {
        let mut spec = plane(vec![mark("blue", 3), mark("blue", 5)]);
        spec.layer_order = Some(vec!["_1".into(), "_3".into()]);
        let err = assemble(&spec).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Layer order names unknown layer suffix '_3' (known: _1, _2)"
        );
    }

    #[test]
    fn structural_errors() {
        let err = assemble(&PlotSpec::new("polar")).unwrap_err();
        assert_eq!(err.to_string(), "Unknown plot type: polar");

        let mut stray = mark("blue", 3);
        stray.zone = Some(2);
        let err = assemble(&plane(vec![stray])).unwrap_err();
        assert!(matches!(err, Error::ZoneIndex { zone: 2, .. }));

        let mut spec = plane(Vec::new());
        spec.zone_configs.push(ConfigMap::new());
        spec.trimming_specs = vec![None, None, None];
        assert!(matches!(assemble(&spec), Err(Error::SpecCount { actual: 3, .. })));

        let short = Assembler::new(Registry::standard(), FormatRegistry::standard(), &LocationNamer)
            .with_layer_suffixer(Suffixer::Fixed {
                names: vec!["L".into()],
            })
            .assemble(&plane(vec![mark("blue", 3), mark("blue", 5)]));
        assert!(matches!(short, Err(Error::SuffixCount { expected: 2, actual: 1, .. })));

        let ambiguous = Assembler::new(Registry::standard(), FormatRegistry::standard(), &LocationNamer)
            .with_layer_suffixer(Suffixer::Fixed {
                names: vec!["a".into(), "ab".into()],
            })
            .assemble(&plane(vec![mark("blue", 3), mark("blue", 5)]));
        assert!(matches!(ambiguous, Err(Error::AmbiguousSuffix { .. })));
    }

    #[test]
    fn legend_labels_and_exclusions() {
        let mut labelled = mark("blue", 3);
        labelled.legend_label = Some("Bright".into());
        let mut spec = plane(vec![labelled, mark("blue", 5)]);
        spec.trimming_specs = vec![Some(TrimmingSpec {
            title: Some("Stars".into()),
            legend: Some(LegendSpec::default()),
        })];
        let command = assemble(&spec).unwrap();

        assert_eq!(value(&command, "leglabel_1"), Some("Bright"));
        assert!(command.get("leglabel_2").is_none());
        assert_eq!(value(&command, "legseq"), Some("_1"));
        assert_eq!(value(&command, "title"), Some("Stars"));
        assert_eq!(value(&command, "legend"), Some("true"));
        assert!(command.get("legborder").unwrap().is_default_value());
    }

    #[test]
    fn zoneless_layers_stay_out_of_the_legend() {
        let mut zoneless = mark("blue", 3);
        zoneless.zone = None;
        zoneless.legend_label = Some("Bright".into());
        let mut zoned = mark("blue", 5);
        zoned.legend_label = Some("Faint".into());
        let mut spec = plane(vec![zoneless, zoned]);
        spec.trimming_specs = vec![Some(TrimmingSpec {
            title: None,
            legend: Some(LegendSpec::default()),
        })];
        let command = assemble(&spec).unwrap();

        assert!(command.get("leglabel_1").is_none());
        assert_eq!(value(&command, "leglabel_2"), Some("Faint"));
        assert!(command.get("legseq").is_none());
    }

    #[test]
    fn global_trimming_and_shading_for_several_zones() {
        let mut spec = plane(Vec::new());
        spec.zone_configs.push(ConfigMap::new());
        spec.trimming_specs = vec![Some(TrimmingSpec {
            title: Some("Both".into()),
            legend: None,
        })];
        spec.shade_specs = vec![Some(ShadeSpec {
            label: Some("Mag".into()),
            ..ShadeSpec::default()
        })];
        let command = assemble(&spec).unwrap();

        assert_eq!(value(&command, "title"), Some("Both"));
        assert_eq!(value(&command, "legend"), Some("false"));
        assert_eq!(value(&command, "auxlabel"), Some("Mag"));
        assert!(command.get("title_a").is_none());
        // Identical zone surfaces collapse into the common zone group.
        assert!(command.get("xlog").is_some());
        assert!(command.get("xlog_a").is_none());
    }

    #[test]
    fn zones_with_different_surfaces_keep_suffixes() {
        let mut spec = plane(Vec::new());
        spec.zone_configs = vec![
            ConfigMap::new().with(&keys::grid(false), ConfigValue::Bool(true)),
            ConfigMap::new(),
        ];
        let command = assemble(&spec).unwrap();
        assert_eq!(value(&command, "grid_a"), Some("true"));
        assert_eq!(value(&command, "grid_b"), Some("false"));
        assert!(command.get("grid").is_none());
    }

    #[test]
    fn input_table_details() {
        let mut layer = mark("blue", 3);
        layer.table = Some(
            TableRef::new("cat")
                .with_location("cat.csv")
                .with_format("csv"),
        );
        layer.select = Some(CredibleString::new("vmag < 12", Credibility::Yes));
        layer.coords = vec![
            CoordSpec::new("x", "t").with_mapper("mjd", Some("iso")),
            CoordSpec::new("y", "flux").with_mapper("mjd", Some("mjd")),
        ];
        let command = assemble(&plane(vec![layer])).unwrap();

        assert_eq!(value(&command, "ifmt_1"), Some("csv"));
        assert_eq!(value(&command, "icmd_1"), Some("select \"vmag < 12\""));
        assert!(!command.get("xtype_1").unwrap().is_default_value());
        assert!(command.get("ytype_1").unwrap().is_default_value());

        let object = command.get("in_1").and_then(Setting::object).unwrap();
        assert_eq!(
            object.downcast_ref::<TableRef>().map(|t| t.label.as_str()),
            Some("cat")
        );

        let text = TextFormatter::default().format(&command);
        assert!(text.contains("icmd_1='select \"vmag < 12\"'"));
    }

    #[test]
    fn table_naming_credibility() {
        let mut layer = mark("blue", 3);
        layer.table = Some(TableRef::new("scratch"));
        let spec = plane(vec![layer]);

        let command = assemble(&spec).unwrap();
        assert_eq!(command.get("in_1").unwrap().credibility(), Credibility::No);
        assert!(command.get("ifmt_1").is_none());

        let command = Assembler::new(Registry::standard(), FormatRegistry::standard(), &LabelNamer)
            .assemble(&spec)
            .unwrap();
        assert_eq!(command.get("in_1").unwrap().credibility(), Credibility::Maybe);
        assert_eq!(command.get("ifmt_1").unwrap().credibility(), Credibility::Maybe);
    }

    #[test]
    fn matrix_settings_are_global() {
        let spec = PlotSpec {
            zone_configs: vec![ConfigMap::new(); 3],
            ..PlotSpec::new("matrix")
        };
        let command = assemble(&spec).unwrap();
        assert_eq!(command.task_name(), "plot2corner");
        assert!(command.get("x1log").is_some());
        assert!(command.get("x2flip").is_some());
        assert!(command.get("xlog").is_none());
        assert!(command.get("matrixformat").unwrap().is_default_value());
    }

    #[test]
    fn assembly_is_deterministic() {
        let spec = sky(vec![sky_layer("fk5"), sky_layer("galactic")]);
        let first = assemble(&spec).unwrap();
        let second = assemble(&spec).unwrap();
        // Setting equality skips defaults, so compare the full serialised form.
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        let verbose = TextFormatter {
            include_defaults: true,
            ..TextFormatter::default()
        };
        assert_eq!(verbose.format(&first), verbose.format(&second));
        assert_eq!(
            TextFormatter::default().format(&first),
            TextFormatter::default().format(&second)
        );
    }
}
