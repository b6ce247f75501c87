//! One diagnostic run over a measurement snapshot.
//!
//! [`DiagnosticRun`] holds every per-domain outcome of a run. The integrated
//! assessment is computed only once all three domain results exist; a
//! snapshot missing a domain still gets its other sections diagnosed and
//! reported.

use pumpdiag_types::{
    BearingTemperatures, DiagnosisResult, Domain, ElectricalMeasurement, FftPeak,
    HydraulicMeasurement, IntegratedDiagnosisResult, SharedContext, VibrationSurvey,
};
use serde::Serialize;

use crate::aggregate::aggregate;
use crate::calc::{resolve_design, ElectricalParameters, HydraulicParameters};
use crate::diagnose::{electrical, hydraulic, mechanical};
use crate::recommend::recommend;
use crate::report::{
    render_report, ElectricalSummary, HydraulicSummary, MechanicalSummary, ReportData,
};
use crate::source::MeasurementSnapshot;
use crate::thresholds::ThresholdConfig;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MechanicalOutcome {
    pub survey: VibrationSurvey,
    pub fft_peaks: Vec<FftPeak>,
    pub result: DiagnosisResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HydraulicOutcome {
    /// Measurement with design data resolved.
    pub measurement: HydraulicMeasurement,
    pub parameters: HydraulicParameters,
    pub result: DiagnosisResult,
    /// One note per estimated design value.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub estimation_notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElectricalOutcome {
    pub measurement: ElectricalMeasurement,
    pub parameters: ElectricalParameters,
    pub result: DiagnosisResult,
}

/// Results of diagnosing one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticRun {
    pub context: SharedContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperatures: Option<BearingTemperatures>,
    pub mechanical: Option<MechanicalOutcome>,
    pub hydraulic: Option<HydraulicOutcome>,
    pub electrical: Option<ElectricalOutcome>,
    pub integrated: Option<IntegratedDiagnosisResult>,
}

impl DiagnosticRun {
    /// Run every stage the snapshot has data for.
    pub fn from_snapshot(snapshot: &MeasurementSnapshot, config: &ThresholdConfig) -> Self {
        let context = snapshot.shared_context();
        let temperatures = snapshot.temperatures;
        tracing::info!(machine = %context.machine_id, rpm = context.rpm, fluid = %context.fluid, "starting diagnostic run");

        let mechanical = snapshot.vibration.as_ref().map(|v| MechanicalOutcome {
            result: mechanical::diagnose(
                &v.points,
                &v.fft_peaks,
                &context,
                temperatures.as_ref(),
                config,
            ),
            survey: v.points.clone(),
            fft_peaks: v.fft_peaks.clone(),
        });

        let hydraulic = snapshot.hydraulic.as_ref().map(|section| {
            let (measurement, estimation_notes) = resolve_design(section.measurement(context.fluid));
            let parameters = HydraulicParameters::compute(&measurement);
            HydraulicOutcome {
                result: hydraulic::diagnose(&measurement, &parameters, config),
                measurement,
                parameters,
                estimation_notes,
            }
        });

        let electrical = snapshot.electrical.map(|measurement| {
            let parameters = ElectricalParameters::compute(&measurement, &config.electrical);
            ElectricalOutcome {
                result: electrical::diagnose(&parameters, config),
                measurement,
                parameters,
            }
        });

        let integrated = match (&mechanical, &hydraulic, &electrical) {
            (Some(m), Some(h), Some(e)) => Some(aggregate(
                &m.result,
                &h.result,
                &e.result,
                temperatures.as_ref(),
                config,
            )),
            _ => {
                tracing::warn!(
                    mechanical = mechanical.is_some(),
                    hydraulic = hydraulic.is_some(),
                    electrical = electrical.is_some(),
                    "integrated diagnosis skipped, not every domain has a result"
                );
                None
            }
        };

        Self {
            context,
            temperatures,
            mechanical,
            hydraulic,
            electrical,
            integrated,
        }
    }

    /// Domain results present in this run, in fixed order.
    pub fn results(&self) -> impl Iterator<Item = &DiagnosisResult> {
        [
            self.mechanical.as_ref().map(|o| &o.result),
            self.hydraulic.as_ref().map(|o| &o.result),
            self.electrical.as_ref().map(|o| &o.result),
        ]
        .into_iter()
        .flatten()
    }

    /// Render the plain-text report.
    pub fn report(&self, config: &ThresholdConfig) -> String {
        let data = ReportData {
            context: &self.context,
            temperatures: self.temperatures.as_ref(),
            mechanical: self.mechanical.as_ref().map(|o| MechanicalSummary {
                survey: &o.survey,
                result: &o.result,
            }),
            hydraulic: self.hydraulic.as_ref().map(|o| HydraulicSummary {
                measurement: &o.measurement,
                parameters: &o.parameters,
                result: &o.result,
            }),
            electrical: self.electrical.as_ref().map(|o| ElectricalSummary {
                measurement: &o.measurement,
                parameters: &o.parameters,
                result: &o.result,
            }),
            integrated: self.integrated.as_ref(),
        };
        render_report(&data, &config.zones)
    }

    /// Remediation text for every domain result that reports a finding.
    pub fn recommendations(&self) -> Vec<(Domain, String)> {
        self.results()
            .filter(|r| !r.is_normal())
            .map(|r| (r.domain, recommend(r, &self.context)))
            .collect()
    }
}
