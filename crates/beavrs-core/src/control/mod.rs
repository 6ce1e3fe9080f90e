//! Control-rod bank positions for the overlapped insertion schedule.
//!
//! Step 0 has every bank fully withdrawn (228 steps) and step 574 every bank
//! fully inserted. Bank D moves first; each following bank starts once the
//! previous one is below 113 steps.

use crate::common::config::AxialConfig;
use crate::common::constants::{BANK_FULL_STEPS, MAX_CONTROL_STEP};
use crate::domain::{BuildError, BuildResult};
use serde::Serialize;

/// Steps withdrawn below which the next bank starts moving.
const OVERLAP_THRESHOLD: i64 = 113;

/// Offsets of banks C, B and A relative to bank D. They carry the +3/+5/+7
/// calibration on top of the 113-step overlaps.
const BANK_C_OFFSET: i64 = 113 + 3;
const BANK_B_OFFSET: i64 = 226 + 5;
const BANK_A_OFFSET: i64 = 339 + 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControlBankSteps {
    pub a: i64,
    pub b: i64,
    pub c: i64,
    pub d: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BankAxials {
    pub steps: i64,
    pub bottom: f64,
    pub top: f64,
}

impl BankAxials {
    fn at(steps: i64, axial: &AxialConfig) -> Self {
        let bottom = axial.step0_height + axial.step_width * steps as f64;
        Self {
            steps,
            bottom,
            top: bottom + axial.step_width * BANK_FULL_STEPS as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ControlBankAxials {
    pub step: i64,
    pub a: BankAxials,
    pub b: BankAxials,
    pub c: BankAxials,
    pub d: BankAxials,
}

impl ControlBankAxials {
    /// Banks in A, B, C, D order with their labels.
    pub fn banks(&self) -> [(&'static str, BankAxials); 4] {
        [("A", self.a), ("B", self.b), ("C", self.c), ("D", self.d)]
    }
}

fn trailing_bank(leader: i64, step: i64, offset: i64) -> i64 {
    if leader >= OVERLAP_THRESHOLD {
        BANK_FULL_STEPS
    } else {
        (BANK_FULL_STEPS - step + offset).max(0)
    }
}

pub fn control_bank_steps(step: i64) -> BuildResult<ControlBankSteps> {
    if !(0..=MAX_CONTROL_STEP).contains(&step) {
        return Err(BuildError::InvalidStep {
            step,
            max: MAX_CONTROL_STEP,
        });
    }
    let d = (BANK_FULL_STEPS - step).max(0);
    let c = trailing_bank(d, step, BANK_C_OFFSET);
    let b = trailing_bank(c, step, BANK_B_OFFSET);
    let a = trailing_bank(b, step, BANK_A_OFFSET);
    Ok(ControlBankSteps { a, b, c, d })
}

/// Bottom and top elevation of each bank at `step`.
pub fn control_bank_axials(step: i64, axial: &AxialConfig) -> BuildResult<ControlBankAxials> {
    let steps = control_bank_steps(step)?;
    Ok(ControlBankAxials {
        step,
        a: BankAxials::at(steps.a, axial),
        b: BankAxials::at(steps.b, axial),
        c: BankAxials::at(steps.c, axial),
        d: BankAxials::at(steps.d, axial),
    })
}
