//! The `vital guide` command: usage notes printed to stdout.

use console::style;

const HOW_TO_USE: &[&str] = &[
    "Pick an image: pass the path to a medical image to `vital analyze`",
    "Generate analysis: wait for the spinner while the model reads the image",
    "Review results: read the AI-generated analysis report",
    "Consult a professional: always verify findings with a medical professional",
];

const SUPPORTED_TYPES: &[&str] = &[
    "X-rays",
    "CT Scans",
    "MRI Images",
    "Ultrasound Images",
    "Other medical imaging saved as JPG, JPEG or PNG",
];

const IMPORTANT_NOTES: &[&str] = &[
    "This tool is for educational purposes only",
    "Always consult healthcare professionals",
    "AI analysis should not replace medical expertise",
    "Ensure image quality is adequate for analysis",
];

pub fn print_guide() {
    println!("{}", render_guide(console::colors_enabled()));
}

fn render_guide(styled: bool) -> String {
    let heading = |title: &str| {
        if styled {
            style(title).bold().cyan().to_string()
        } else {
            title.to_string()
        }
    };

    let mut out = String::new();
    out.push_str(&heading("📖 How to Use"));
    out.push('\n');
    for (i, step) in HOW_TO_USE.iter().enumerate() {
        out.push_str(&format!("  {}. {step}\n", i + 1));
    }

    out.push('\n');
    out.push_str(&heading("📋 Supported Image Types"));
    out.push('\n');
    for kind in SUPPORTED_TYPES {
        out.push_str(&format!("  - {kind}\n"));
    }

    out.push('\n');
    out.push_str(&heading("⚠️ Important Notes"));
    out.push('\n');
    for note in IMPORTANT_NOTES {
        out.push_str(&format!("  - {note}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guide_lists_every_section() {
        let text = render_guide(false);
        assert!(text.contains("How to Use"));
        assert!(text.contains("  4. Consult a professional"));
        assert!(text.contains("  - MRI Images"));
        assert!(text.contains("Important Notes"));
    }
}
