use std::fmt::Display;
use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use growable_array::{DEFAULT_CAPACITY, GrowableArray};
use log::{debug, info};

use crate::report::Report;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkthroughConfig {
    /// Initial capacity handed to every array a scenario builds.
    pub capacity: usize,
}

impl Default for WalkthroughConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    Append,
    Push,
    Insert,
    Remove,
    Find,
    FindAll,
    Sort,
    Merge,
    Reverse,
    ExtremesInt,
    ExtremesText,
    Clear,
    Capacity,
}

impl Scenario {
    pub fn title(self) -> &'static str {
        match self {
            Scenario::Append => "Append",
            Scenario::Push => "Push & PushBack",
            Scenario::Insert => "Insert",
            Scenario::Remove => "RemoveAt",
            Scenario::Find => "Find",
            Scenario::FindAll => "FindAll",
            Scenario::Sort => "Sort",
            Scenario::Merge => "Merge",
            Scenario::Reverse => "Reverse",
            Scenario::ExtremesInt => "Max & Min (int)",
            Scenario::ExtremesText => "Max & Min (string)",
            Scenario::Clear => "Clear",
            Scenario::Capacity => "Size & Capacity",
        }
    }

    /// The name accepted on the command line.
    pub fn name(self) -> String {
        self.to_possible_value()
            .map(|value| value.get_name().to_string())
            .unwrap_or_default()
    }

    pub fn run<W: Write>(self, config: &WalkthroughConfig, report: &mut Report<W>) -> Result<()> {
        report.section(self.title())?;
        match self {
            Scenario::Append => append(config, report),
            Scenario::Push => push(config, report),
            Scenario::Insert => insert(config, report),
            Scenario::Remove => remove(config, report),
            Scenario::Find => find(config, report),
            Scenario::FindAll => find_all(config, report),
            Scenario::Sort => sort(config, report),
            Scenario::Merge => merge(config, report),
            Scenario::Reverse => reverse(config, report),
            Scenario::ExtremesInt => extremes_int(config, report),
            Scenario::ExtremesText => extremes_text(config, report),
            Scenario::Clear => clear(config, report),
            Scenario::Capacity => capacity(config, report),
        }
    }
}

/// Runs `scenarios` in order, stopping at the first one that fails outright.
pub fn run<W: Write>(
    scenarios: &[Scenario],
    config: &WalkthroughConfig,
    report: &mut Report<W>,
) -> Result<()> {
    for &scenario in scenarios {
        info!("running scenario {}", scenario.name());
        scenario
            .run(config, report)
            .with_context(|| format!("scenario '{}' failed", scenario.name()))?;
    }
    debug!(
        "{} checks, {} mismatches",
        report.checks(),
        report.mismatches().len()
    );
    Ok(())
}

/// Capacity an array starting at `initial` slots has once it held `peak` elements.
pub fn expected_capacity(initial: usize, peak: usize) -> usize {
    let mut cap = initial.max(1);
    while cap < peak {
        cap *= 2;
    }
    cap
}

fn empty<T>(config: &WalkthroughConfig) -> Result<GrowableArray<T>> {
    GrowableArray::try_with_capacity(config.capacity)
        .with_context(|| format!("allocating {} slots", config.capacity))
}

fn array<T: Clone>(config: &WalkthroughConfig, items: &[T]) -> Result<GrowableArray<T>> {
    let mut arr = empty(config)?;
    arr.extend(items.iter().cloned());
    Ok(arr)
}

fn outcome<T: Display>(result: growable_array::Result<T>) -> String {
    match result {
        Ok(value) => value.to_string(),
        Err(err) => err.to_string(),
    }
}

fn shape<T>(arr: &GrowableArray<T>) -> String {
    format!("size {}, capacity {}", arr.len(), arr.capacity())
}

/// Two front pushes followed by five appends.
fn pushed(config: &WalkthroughConfig) -> Result<GrowableArray<i32>> {
    let mut arr = empty(config)?;
    arr.push_front(10);
    arr.push_front(20);
    for value in [30, 40, 50, 60, 70] {
        arr.push_back(value);
    }
    Ok(arr)
}

fn pushed_and_inserted(config: &WalkthroughConfig) -> Result<GrowableArray<i32>> {
    let mut arr = pushed(config)?;
    arr.insert_at(2, 99).context("insert_at(2, 99)")?;
    Ok(arr)
}

fn pushed_inserted_removed(config: &WalkthroughConfig) -> Result<GrowableArray<i32>> {
    let mut arr = pushed_and_inserted(config)?;
    arr.remove_at(3).context("remove_at(3)")?;
    Ok(arr)
}

fn append<W: Write>(config: &WalkthroughConfig, report: &mut Report<W>) -> Result<()> {
    let mut arr = empty(config)?;
    for value in [10, 20, 30, 40, 50, 60] {
        arr.push_back(value);
    }
    report.check("[10, 20, 30, 40, 50, 60]", &arr)?;
    report.check(
        format!("size 6, capacity {}", expected_capacity(config.capacity, 6)),
        shape(&arr),
    )?;
    Ok(())
}

fn push<W: Write>(config: &WalkthroughConfig, report: &mut Report<W>) -> Result<()> {
    let arr = pushed(config)?;
    report.check("[20, 10, 30, 40, 50, 60, 70]", &arr)?;
    Ok(())
}

fn insert<W: Write>(config: &WalkthroughConfig, report: &mut Report<W>) -> Result<()> {
    let arr = pushed_and_inserted(config)?;
    report.check("[20, 10, 99, 30, 40, 50, 60, 70]", &arr)?;

    let mut small = array(config, &[10, 20, 30])?;
    small.insert_at(1, 99).context("insert_at(1, 99)")?;
    report.check("[10, 99, 20, 30]", &small)?;

    let refused = small.insert_at(5, 1).map(|()| "inserted");
    report.check("Index out of bounds: index 5, len 4", outcome(refused))?;
    report.check("[10, 99, 20, 30]", &small)?;
    Ok(())
}

fn remove<W: Write>(config: &WalkthroughConfig, report: &mut Report<W>) -> Result<()> {
    let arr = pushed_inserted_removed(config)?;
    report.check("[20, 10, 99, 40, 50, 60, 70]", &arr)?;

    let mut small = array(config, &[10, 20, 30, 40])?;
    let removed = small.remove_at(1).context("remove_at(1)")?;
    report.check(20, removed)?;
    report.check("[10, 30, 40]", &small)?;
    report.check("Index out of bounds: index 3, len 3", outcome(small.remove_at(3)))?;
    Ok(())
}

fn find<W: Write>(config: &WalkthroughConfig, report: &mut Report<W>) -> Result<()> {
    let arr = pushed_inserted_removed(config)?;
    report.note("Array", &arr)?;
    report.check("index 2", outcome(arr.find(&99).map(|i| format!("index {i}"))))?;
    report.check("Element not found", outcome(arr.find(&999).map(|i| format!("index {i}"))))?;
    Ok(())
}

fn find_all<W: Write>(config: &WalkthroughConfig, report: &mut Report<W>) -> Result<()> {
    let arr = array(config, &[10, 20, 10, 30, 10])?;
    report.note("Array", &arr)?;
    report.check("[0, 2, 4]", arr.find_all(&10))?;
    report.check("[]", arr.find_all(&999))?;
    Ok(())
}

fn sort<W: Write>(config: &WalkthroughConfig, report: &mut Report<W>) -> Result<()> {
    let arr = array(config, &[5, 3, 8, 1, 4])?;
    report.note("Original", &arr)?;
    report.check("[1, 3, 4, 5, 8]", arr.sorted())?;
    report.check("[5, 3, 8, 1, 4]", &arr)?;
    Ok(())
}

fn merge<W: Write>(config: &WalkthroughConfig, report: &mut Report<W>) -> Result<()> {
    let a = array(config, &[1, 2, 3])?;
    let b = array(config, &[4, 5, 6])?;
    report.note("a", &a)?;
    report.note("b", &b)?;
    report.check("[1, 2, 3, 4, 5, 6]", a.merged_with(&b))?;
    report.check("[1, 2, 3]", &a)?;
    report.check("[4, 5, 6]", &b)?;
    Ok(())
}

fn reverse<W: Write>(config: &WalkthroughConfig, report: &mut Report<W>) -> Result<()> {
    let arr = array(config, &[1, 2, 3, 4])?;
    report.note("Original", &arr)?;
    report.check("[4, 3, 2, 1]", arr.reversed())?;
    report.check("[1, 2, 3, 4]", &arr)?;
    report.check(&arr, arr.reversed().reversed())?;
    Ok(())
}

fn extremes_int<W: Write>(config: &WalkthroughConfig, report: &mut Report<W>) -> Result<()> {
    let nums = array(config, &[3, 7, 1, 9, 2])?;
    report.note("Array", &nums)?;
    report.check(9, outcome(nums.maximum()))?;
    report.check(1, outcome(nums.minimum()))?;
    Ok(())
}

fn extremes_text<W: Write>(config: &WalkthroughConfig, report: &mut Report<W>) -> Result<()> {
    let words: Vec<String> = ["hi", "hello", "hey", "howdy"]
        .iter()
        .map(|w| w.to_string())
        .collect();
    let words = array(config, &words)?;
    report.note("Array", &words)?;
    // Longest wins; "hello" and "howdy" tie on length and the first one is kept.
    report.check("hello", outcome(words.maximum()))?;
    report.check("hi", outcome(words.minimum()))?;

    let none: GrowableArray<String> = empty(config)?;
    report.check("Array is empty", outcome(none.maximum()))?;
    Ok(())
}

fn clear<W: Write>(config: &WalkthroughConfig, report: &mut Report<W>) -> Result<()> {
    let mut arr = array(config, &[1, 2, 3])?;
    report.note("Before", &arr)?;
    arr.clear();
    report.check("[]", &arr)?;
    report.check(true, arr.is_empty())?;
    report.check(format!("size 0, capacity {DEFAULT_CAPACITY}"), shape(&arr))?;
    Ok(())
}

fn capacity<W: Write>(config: &WalkthroughConfig, report: &mut Report<W>) -> Result<()> {
    let arr = pushed_inserted_removed(config)?;
    // Eight elements were live right after the insert.
    report.check(
        format!("size 7, capacity {}", expected_capacity(config.capacity, 8)),
        shape(&arr),
    )?;
    Ok(())
}
