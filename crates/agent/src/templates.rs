//! Deterministic keyword-to-template generator.
//!
//! Each template carries a keyword set. A prompt picks the template with the
//! most keyword hits among its words; ties go to the earlier template, and a
//! prompt with no hits gets the fallback groove. Same prompt, same code.

use tracing::debug;

use crate::error::GeneratorError;
use crate::generator::{normalize_prompt, validate_prompt, GeneratedPattern, PatternGenerator};

/// One entry of the template table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub code: &'static str,
}

pub const TEMPLATES: &[Template] = &[
    Template {
        name: "muffled-bass",
        keywords: &["muffled", "bass", "dark", "deep", "warm", "sub", "underwater"],
        code: r#"note("c2 c2 eb2 g1").s("sawtooth").lpf(300).lpq(2).gain(0.8).slow(2)"#,
    },
    Template {
        name: "fast-techno",
        keywords: &["techno", "fast", "hard", "driving", "rave", "industrial", "pounding"],
        code: r#"stack(s("bd*4"), s("hh*8").gain(0.6), s("~ cp").room(0.2)).fast(2).distort(2)"#,
    },
    Template {
        name: "ambient-drift",
        keywords: &["ambient", "chill", "calm", "dreamy", "pad", "slow", "floating"],
        code: r#"note("c3 e3 g3 b3").s("triangle").room(0.9).delay(0.5).slow(4)"#,
    },
    Template {
        name: "broken-beat",
        keywords: &["break", "breakbeat", "jungle", "drum", "dnb", "amen", "broken"],
        code: r#"s("bd ~ sd ~ bd bd sd ~").bank("RolandTR909").speed(1.2).fast(1.5)"#,
    },
    Template {
        name: "bright-lead",
        keywords: &["bright", "lead", "happy", "melody", "sunny", "pluck", "sparkly"],
        code: r#"note("e5 g5 a5 c6").s("square").hpf(800).gain(0.7).fast(2)"#,
    },
];

pub const FALLBACK: Template = Template {
    name: "groove",
    keywords: &[],
    code: r#"s("bd sd").bank("RolandTR808").gain(0.9)"#,
};

/// Offline generator backed by [`TEMPLATES`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateGenerator;

impl TemplateGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Template a prompt resolves to.
    pub fn select(&self, prompt: &str) -> &'static Template {
        let normalized = normalize_prompt(prompt);
        let words: Vec<&str> = normalized
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        let mut best: Option<(&'static Template, usize)> = None;
        for template in TEMPLATES {
            let hits = words
                .iter()
                .filter(|&&word| template.keywords.iter().any(|&k| k == word))
                .count();
            if hits > 0 && best.map_or(true, |(_, top)| hits > top) {
                best = Some((template, hits));
            }
        }
        best.map_or(&FALLBACK, |(template, _)| template)
    }
}

impl PatternGenerator for TemplateGenerator {
    fn generate(&self, prompt: &str) -> Result<GeneratedPattern, GeneratorError> {
        validate_prompt(prompt)?;
        let template = self.select(prompt);
        debug!(template = template.name, "template_selected");
        Ok(GeneratedPattern {
            code: template.code.to_string(),
        })
    }
}
