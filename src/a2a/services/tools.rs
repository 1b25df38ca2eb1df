//! Built-in agent tools.

use crate::a2a::ports::{AgentTool, ToolOutput};
use mockable::Clock;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

#[expect(
    clippy::expect_used,
    reason = "the pattern is a literal exercised by the calculator tests"
)]
static ARITHMETIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:^|[^\w.-])(-?\d+)(?:\s*([+*/×÷])\s*|\s+([-x])\s+)(-?\d+)(?:$|[^\w.]|\.(?:\D|$))",
    )
    .expect("arithmetic pattern is valid")
});

/// Evaluates binary integer arithmetic found in the input.
///
/// Every `<a> <op> <b>` occurrence is evaluated; `x` and `×` are accepted
/// for multiplication and `÷` for division. Operands must stand alone, and
/// `-` and `x` need surrounding spaces, so dates, hex literals and decimals
/// are left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalculatorTool;

impl CalculatorTool {
    /// Tool name reported in `tools_used`.
    pub const NAME: &'static str = "calculator";

    /// Creates the tool.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl AgentTool for CalculatorTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn invoke(&self, input: &str) -> Option<ToolOutput> {
        let lines: Vec<String> = ARITHMETIC
            .captures_iter(input)
            .filter_map(|captures| {
                let lhs = captures.get(1)?.as_str().parse::<i64>().ok()?;
                let operator = captures.get(2).or_else(|| captures.get(3))?.as_str();
                let rhs = captures.get(4)?.as_str().parse::<i64>().ok()?;
                Some(evaluate(lhs, operator, rhs))
            })
            .collect();

        if lines.is_empty() {
            return None;
        }
        Some(ToolOutput::new(Self::NAME, lines.join("\n")))
    }
}

fn evaluate(lhs: i64, operator: &str, rhs: i64) -> String {
    let symbol = match operator {
        "x" | "×" => "*",
        "÷" => "/",
        other => other,
    };

    let value = match symbol {
        "+" => lhs.checked_add(rhs),
        "-" => lhs.checked_sub(rhs),
        "*" => lhs.checked_mul(rhs),
        "/" => {
            if rhs == 0 {
                return format!("{lhs} / {rhs} is undefined (division by zero)");
            }
            let quotient = lhs.checked_div(rhs);
            let remainder = lhs.checked_rem(rhs).unwrap_or_default();
            if remainder != 0 {
                return quotient.map_or_else(
                    || format!("{lhs} / {rhs} overflows"),
                    |q| format!("{lhs} / {rhs} = {q} remainder {remainder}"),
                );
            }
            quotient
        }
        _ => None,
    };

    value.map_or_else(
        || format!("{lhs} {symbol} {rhs} overflows"),
        |result| format!("{lhs} {symbol} {rhs} = {result}"),
    )
}

/// Reports the current UTC time when the input asks about time or dates.
#[derive(Debug, Clone)]
pub struct ClockTool<C> {
    clock: Arc<C>,
}

impl<C: Clock> ClockTool<C> {
    /// Tool name reported in `tools_used`.
    pub const NAME: &'static str = "clock";

    const TRIGGERS: [&'static str; 5] = ["time", "date", "today", "now", "clock"];

    /// Creates the tool reading from `clock`.
    #[must_use]
    pub const fn new(clock: Arc<C>) -> Self {
        Self { clock }
    }
}

impl<C: Clock + Send + Sync> AgentTool for ClockTool<C> {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn invoke(&self, input: &str) -> Option<ToolOutput> {
        let asks_for_time = input
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| {
                Self::TRIGGERS
                    .iter()
                    .any(|trigger| word.eq_ignore_ascii_case(trigger))
            });

        asks_for_time.then(|| {
            let now = self.clock.utc();
            ToolOutput::new(
                Self::NAME,
                format!("Current UTC time: {}", now.format("%Y-%m-%d %H:%M:%S")),
            )
        })
    }
}

/// Answers from a fixed table of facts keyed by case-insensitive phrases.
#[derive(Debug, Clone)]
pub struct LookupTool {
    name: String,
    facts: BTreeMap<String, String>,
}

impl LookupTool {
    /// Creates an empty lookup table named `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            facts: BTreeMap::new(),
        }
    }

    /// Adds a fact returned whenever `key` appears in the input.
    #[must_use]
    pub fn with_fact(mut self, key: &str, fact: impl Into<String>) -> Self {
        self.facts.insert(key.trim().to_lowercase(), fact.into());
        self
    }
}

impl AgentTool for LookupTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn invoke(&self, input: &str) -> Option<ToolOutput> {
        let haystack = input.to_lowercase();
        let matches: Vec<&str> = self
            .facts
            .iter()
            .filter(|(key, _)| !key.is_empty() && haystack.contains(key.as_str()))
            .map(|(_, fact)| fact.as_str())
            .collect();

        if matches.is_empty() {
            return None;
        }
        Some(ToolOutput::new(self.name.clone(), matches.join("\n")))
    }
}
