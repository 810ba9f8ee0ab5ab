use crate::cli::TemplatesArgs;
use crate::commands::load_template_library;
use crate::error::Result;
use pepextend::core::templates::library::TemplateLibrary;
use pepextend::core::utils::identifiers::is_standard_residue;

pub fn run(args: TemplatesArgs) -> Result<()> {
    let library = load_template_library(args.templates.as_deref())?;
    for line in summary_lines(&library) {
        println!("{}", line);
    }
    Ok(())
}

fn summary_lines(library: &TemplateLibrary) -> Vec<String> {
    let mut lines = vec![format!("{:<6} {:>6}  {}", "CODE", "ATOMS", "KIND")];
    let mut custom = 0;
    for (code, atom_count) in library.summary() {
        let kind = if is_standard_residue(code) {
            "standard"
        } else {
            custom += 1;
            "custom"
        };
        lines.push(format!("{:<6} {:>6}  {}", code, atom_count, kind));
    }
    lines.push(format!(
        "{} residue template(s) available, {} custom.",
        library.len(),
        custom
    ));
    lines
}
