use palliate_core::models::calculator::{CalculatorKind, CalculatorRecord};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::PerformanceScale;
use crate::config::parse_config;
use crate::error::CalculatorError;
use crate::opioid::potency::DrugPotencyEntry;
use crate::opioid::rotation::{OpioidRotation, RotationInput, RotationOutcome, UnknownDrugPolicy};
use crate::scales::ecog::EcogScale;
use crate::scales::pps::PpsScale;
use crate::scoring::{ScaleLevel, ScoreRange, ScoreSelection};

/// A calculator built from a record, with its config validated.
#[derive(Debug, Clone)]
pub enum Calculator {
    Ecog(EcogScale),
    Pps(PpsScale),
    OpioidRotation(OpioidRotation),
    Custom,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreInput {
    pub score: f64,
}

/// Evaluation request body. The shape must match the calculator kind.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum CalculatorInput {
    Score(ScoreInput),
    OpioidRotation(RotationInput),
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "kebab-case")]
#[ts(export)]
pub enum CalculatorOutput {
    Ecog(ScoreSelection),
    Pps(ScoreSelection),
    OpioidRotation(RotationOutcome),
}

/// What a client needs to render a calculator's inputs.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "kebab-case")]
#[ts(export)]
pub enum CalculatorSchema {
    Ecog {
        range: ScoreRange,
        levels: Vec<ScaleLevel>,
    },
    Pps {
        range: ScoreRange,
        levels: Vec<ScaleLevel>,
    },
    OpioidRotation {
        drugs: Vec<DrugPotencyEntry>,
        default_reduction_percent: f64,
        default_selection: Option<String>,
    },
    Custom,
}

impl Calculator {
    pub fn from_record(record: &CalculatorRecord) -> Result<Self, CalculatorError> {
        let kind = record.kind;
        let calculator = match kind {
            CalculatorKind::Ecog => {
                Calculator::Ecog(EcogScale::from_config(&parse_config(kind, &record.config)?)?)
            }
            CalculatorKind::Pps => {
                Calculator::Pps(PpsScale::from_config(&parse_config(kind, &record.config)?)?)
            }
            CalculatorKind::OpioidRotation => Calculator::OpioidRotation(
                OpioidRotation::from_config(&parse_config(kind, &record.config)?)?,
            ),
            CalculatorKind::Custom => Calculator::Custom,
        };
        Ok(calculator)
    }

    pub fn kind(&self) -> CalculatorKind {
        match self {
            Calculator::Ecog(_) => CalculatorKind::Ecog,
            Calculator::Pps(_) => CalculatorKind::Pps,
            Calculator::OpioidRotation(_) => CalculatorKind::OpioidRotation,
            Calculator::Custom => CalculatorKind::Custom,
        }
    }

    pub fn evaluate(
        &self,
        input: &CalculatorInput,
        policy: UnknownDrugPolicy,
    ) -> Result<CalculatorOutput, CalculatorError> {
        match (self, input) {
            (Calculator::Ecog(scale), CalculatorInput::Score(input)) => {
                Ok(CalculatorOutput::Ecog(scale.select(input.score)?))
            }
            (Calculator::Pps(scale), CalculatorInput::Score(input)) => {
                Ok(CalculatorOutput::Pps(scale.select(input.score)?))
            }
            (Calculator::OpioidRotation(rotation), CalculatorInput::OpioidRotation(input)) => Ok(
                CalculatorOutput::OpioidRotation(rotation.evaluate(input, policy)?),
            ),
            (Calculator::Custom, _) => Err(CalculatorError::NotImplemented(CalculatorKind::Custom)),
            (calculator, _) => Err(CalculatorError::InputMismatch {
                expected: calculator.kind(),
            }),
        }
    }

    pub fn schema(&self) -> CalculatorSchema {
        match self {
            Calculator::Ecog(scale) => CalculatorSchema::Ecog {
                range: scale.range(),
                levels: scale.levels().to_vec(),
            },
            Calculator::Pps(scale) => CalculatorSchema::Pps {
                range: scale.range(),
                levels: scale.levels().to_vec(),
            },
            Calculator::OpioidRotation(rotation) => CalculatorSchema::OpioidRotation {
                drugs: rotation.table().entries().to_vec(),
                default_reduction_percent: rotation.default_reduction_percent(),
                default_selection: rotation.default_selection().map(str::to_string),
            },
            Calculator::Custom => CalculatorSchema::Custom,
        }
    }
}
