use anyhow::Result;
use replot_core::Registry;
use std::fmt::Write;

pub fn run() -> Result<()> {
    print!("{}", listing(Registry::standard())?);
    Ok(())
}

pub fn listing(registry: &Registry) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "plot types:")?;
    for def in registry.plot_types() {
        writeln!(out, "  {:<8} {}", def.name, def.task_name)?;
    }
    writeln!(out, "plotters:")?;
    for name in registry.plotter_names() {
        let plotter = registry.plotter(name, None)?;
        let keys: Vec<String> = plotter
            .style_keys
            .iter()
            .map(|key| format!("{} ({})", key.short_name(), key.long_name()))
            .collect();
        writeln!(out, "  {:<10} {}", name, keys.join(", "))?;
    }
    let modes: Vec<_> = registry.mode_names().collect();
    writeln!(out, "shading modes: {}", modes.join(", "))?;
    Ok(out)
}
