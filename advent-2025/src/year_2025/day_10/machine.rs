//! Machine descriptions and the line parser.
//!
//! One machine per line:
//!
//! ```text
//! [.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}
//! ```
//!
//! The light pattern and the joltage list are both optional, but a line
//! needs at least one of them to know how many counters the machine has.

use anyhow::{Context, anyhow, bail, ensure};
use regex::Regex;
use std::sync::LazyLock;

static LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:\[(?P<lights>[.#]+)\]\s*)?(?P<buttons>(?:\([0-9]+(?:,[0-9]+)*\)\s*)+)(?:\{(?P<joltage>[0-9]+(?:,[0-9]+)*)\})?$",
    )
    .expect("machine line pattern is valid")
});

static BUTTON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([0-9,]+)\)").expect("button pattern is valid"));

/// The counters one button increments (or lights it toggles).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button(pub Vec<usize>);

impl Button {
    pub fn counters(&self) -> &[usize] {
        &self.0
    }

    pub fn touches(&self, counter: usize) -> bool {
        self.0.contains(&counter)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    /// Target light pattern, `true` for `#`
    pub lights: Option<Vec<bool>>,
    pub buttons: Vec<Button>,
    /// Target joltage per counter
    pub joltage: Option<Vec<u64>>,
}

impl Machine {
    /// Number of counters (lights) on the machine
    pub fn counters(&self) -> usize {
        self.lights
            .as_ref()
            .map(Vec::len)
            .or_else(|| self.joltage.as_ref().map(Vec::len))
            .unwrap_or(0)
    }
}

/// Parse every non-blank line into a [`Machine`]. The first bad line fails the whole input.
pub fn parse_machines(input: &str) -> anyhow::Result<Vec<Machine>> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(line_idx, line)| {
            parse_machine(line.trim()).with_context(|| format!("line {}", line_idx + 1))
        })
        .collect()
}

pub fn parse_machine(line: &str) -> anyhow::Result<Machine> {
    let caps = LINE
        .captures(line)
        .ok_or_else(|| anyhow!("expected `[pattern] (i,j,..)... {{n,..}}`, got {line:?}"))?;

    let lights = caps
        .name("lights")
        .map(|m| m.as_str().bytes().map(|b| b == b'#').collect::<Vec<_>>());

    let joltage = caps
        .name("joltage")
        .map(|m| parse_list::<u64>(m.as_str()))
        .transpose()
        .context("joltage list")?;

    let counters = match (&lights, &joltage) {
        (Some(l), Some(j)) if l.len() != j.len() => bail!(
            "light pattern has {} positions but joltage list has {} values",
            l.len(),
            j.len()
        ),
        (Some(l), _) => l.len(),
        (None, Some(j)) => j.len(),
        (None, None) => bail!("machine needs a light pattern or a joltage list"),
    };

    let buttons = BUTTON
        .captures_iter(&caps["buttons"])
        .enumerate()
        .map(|(button_idx, cap)| {
            let indices = parse_list::<usize>(&cap[1])?;
            for (pos, &index) in indices.iter().enumerate() {
                ensure!(
                    index < counters,
                    "button {} touches counter {} but the machine has {} counters",
                    button_idx,
                    index,
                    counters
                );
                ensure!(
                    !indices[..pos].contains(&index),
                    "button {} lists counter {} twice",
                    button_idx,
                    index
                );
            }
            Ok(Button(indices))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Machine {
        lights,
        buttons,
        joltage,
    })
}

fn parse_list<T>(list: &str) -> anyhow::Result<Vec<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    list.split(',')
        .map(|item| item.parse::<T>().with_context(|| format!("bad number {item:?}")))
        .collect()
}
