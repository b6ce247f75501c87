//! Vibration diagnosis over the twelve-point survey.
//!
//! Two independent evaluations are merged by priority:
//!
//! - the **bearing path** looks at the three acceleration bands of every
//!   point and keeps the most severe bearing finding
//! - the **low-frequency path** looks at the point with the highest overall
//!   velocity (the champion) and its 1×/2× RPM peaks, choosing a rule by the
//!   sensor direction
//!
//! The final result takes, in order: a High low-frequency finding, a High
//! bearing finding, a Medium low-frequency finding, a Medium bearing finding,
//! otherwise Normal.

use pumpdiag_types::{
    BearingTemperatures, DetailKey, DiagnosisResult, Direction, End, FaultType, FftPeak,
    MeasurementPoint, MechanicalCode, PointReading, Severity, SharedContext, VibrationSurvey,
};

use super::{score, temperature};
use crate::thresholds::{AccelerationBaseline, ThresholdConfig, VibrationLimits};

const BEARING_CONFIDENCE_HIGH: u8 = 85;
const BEARING_CONFIDENCE_MEDIUM: u8 = 75;
const NORMAL_CONFIDENCE: u8 = 99;
const UNDIAGNOSED_CONFIDENCE: u8 = 40;

/// Bearing defect stage at a single point, if any.
pub fn classify_bearing(
    reading: &PointReading,
    base: &AccelerationBaseline,
) -> Option<(MechanicalCode, Severity)> {
    let PointReading {
        band1, band2, band3, ..
    } = *reading;

    if band1 > 2.5 * base.band1 && band2 > 1.5 * base.band2 {
        Some((MechanicalCode::BearingSevere, Severity::High))
    } else if band2 > 2.0 * base.band2 && band3 > 1.5 * base.band3 {
        let severity = if band2 > 3.0 * base.band2 {
            Severity::High
        } else {
            Severity::Medium
        };
        Some((MechanicalCode::BearingDeveloped, severity))
    } else if band3 > 2.0 * base.band3 {
        Some((MechanicalCode::BearingEarly, Severity::Medium))
    } else {
        None
    }
}

/// Worst bearing finding across the survey.
///
/// Points are folded in canonical order; a later point replaces the current
/// finding only when its severity is strictly higher.
pub fn evaluate_bearings(
    survey: &VibrationSurvey,
    base: &AccelerationBaseline,
) -> (MechanicalCode, Severity) {
    survey
        .iter()
        .filter_map(|(point, reading)| {
            let finding = classify_bearing(reading, base)?;
            tracing::debug!(%point, code = finding.0.as_str(), severity = %finding.1, "bearing finding");
            Some(finding)
        })
        .fold(
            (MechanicalCode::Normal, Severity::Low),
            |best, candidate| if candidate.1 > best.1 { candidate } else { best },
        )
}

/// Point with the highest overall velocity; ties go to the earlier point.
pub fn champion(survey: &VibrationSurvey) -> (MeasurementPoint, f64) {
    let mut best = (MeasurementPoint::ALL[0], survey.velocity(MeasurementPoint::ALL[0]));
    for (point, reading) in survey.iter().skip(1) {
        if reading.velocity > best.1 {
            best = (point, reading.velocity);
        }
    }
    best
}

/// Amplitude of the peak nearest `target_hz`, if one lies strictly within
/// `tolerance` (relative) of it. Equal distances keep the first peak.
pub fn peak_amplitude(peaks: &[FftPeak], target_hz: f64, tolerance: f64) -> f64 {
    let window = tolerance * target_hz;
    let mut nearest: Option<(f64, f64)> = None;
    for peak in peaks {
        let distance = (peak.frequency_hz - target_hz).abs();
        if distance >= window {
            continue;
        }
        if nearest.map_or(true, |(d, _)| distance < d) {
            nearest = Some((distance, peak.amplitude));
        }
    }
    nearest.map_or(0.0, |(_, amplitude)| amplitude)
}

/// Outcome of the low-frequency path when the champion is above the warning limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowFrequencyFinding {
    pub code: MechanicalCode,
    pub confidence: u8,
    pub severity: Severity,
    pub champion: MeasurementPoint,
    pub champion_velocity: f64,
    pub amp_1x: f64,
    pub amp_2x: f64,
}

/// Direction-specific low-frequency rules at the champion point.
///
/// Returns `None` when the champion velocity is within the warning limit.
pub fn evaluate_low_frequency(
    survey: &VibrationSurvey,
    peaks: &[FftPeak],
    running_speed_hz: f64,
    limits: &VibrationLimits,
) -> Option<LowFrequencyFinding> {
    let (point, velocity) = champion(survey);
    if velocity <= limits.warning {
        return None;
    }

    let severity = if velocity > limits.danger {
        Severity::High
    } else {
        Severity::Medium
    };
    let amp_1x = peak_amplitude(peaks, running_speed_hz, limits.peak_tolerance);
    let amp_2x = peak_amplitude(peaks, 2.0 * running_speed_hz, limits.peak_tolerance);

    let rule = match (point.direction, point.end) {
        (Direction::Axial, End::De) => {
            let opposite = survey.velocity(point.mirrored_machine());
            (amp_2x > 0.5 * amp_1x || opposite > limits.warning).then(|| {
                let bonus = if limits.warning > 0.0 {
                    opposite / limits.warning * 10.0
                } else {
                    0.0
                };
                (MechanicalCode::Misalignment, score(75, bonus, 95))
            })
        }
        (Direction::Horizontal, _) => {
            let opposite = survey.velocity(point.mirrored_end());
            let total: f64 = peaks.iter().map(|p| p.amplitude).sum();
            (amp_1x > 0.7 * total || opposite > limits.warning).then(|| {
                let bonus = if velocity > 0.0 {
                    amp_1x / velocity * 20.0
                } else {
                    0.0
                };
                (MechanicalCode::Unbalance, score(70, bonus, 90))
            })
        }
        (Direction::Vertical, _) => {
            let high_verticals = survey
                .iter()
                .filter(|(p, r)| p.direction == Direction::Vertical && r.velocity > limits.warning)
                .count();
            (high_verticals >= 2 || (amp_2x > 0.1 && amp_1x > 0.1)).then(|| {
                (
                    MechanicalCode::Looseness,
                    score(60, 10.0 * high_verticals as f64, 90),
                )
            })
        }
        (Direction::Axial, End::Nde) => None,
    };

    let (code, confidence) = rule.unwrap_or((MechanicalCode::Undiagnosed, UNDIAGNOSED_CONFIDENCE));
    tracing::debug!(%point, velocity, amp_1x, amp_2x, code = code.as_str(), "low-frequency finding");

    Some(LowFrequencyFinding {
        code,
        confidence,
        severity,
        champion: point,
        champion_velocity: velocity,
        amp_1x,
        amp_2x,
    })
}

/// Diagnose the mechanical domain.
///
/// Bearing temperatures, when supplied, only contribute notes.
pub fn diagnose(
    survey: &VibrationSurvey,
    peaks: &[FftPeak],
    ctx: &SharedContext,
    temps: Option<&BearingTemperatures>,
    config: &ThresholdConfig,
) -> DiagnosisResult {
    let (bearing_code, bearing_severity) = evaluate_bearings(survey, &config.baseline);
    let low_freq =
        evaluate_low_frequency(survey, peaks, ctx.running_speed_hz(), &config.vibration);
    let (champion_point, champion_velocity) = champion(survey);

    let low_freq_result = |finding: &LowFrequencyFinding| {
        DiagnosisResult::new(
            finding.code,
            finding.confidence,
            finding.severity,
            FaultType::LowFrequency,
        )
    };
    let bearing_result = |confidence| {
        DiagnosisResult::new(bearing_code, confidence, bearing_severity, FaultType::HighFrequency)
    };

    let mut result = match (&low_freq, bearing_severity) {
        (Some(f), _) if f.severity == Severity::High => low_freq_result(f),
        (_, Severity::High) => bearing_result(BEARING_CONFIDENCE_HIGH),
        (Some(f), _) => low_freq_result(f),
        (None, Severity::Medium) => bearing_result(BEARING_CONFIDENCE_MEDIUM),
        (None, _) => DiagnosisResult::new(
            MechanicalCode::Normal,
            NORMAL_CONFIDENCE,
            Severity::Low,
            FaultType::Normal,
        ),
    };

    if !result.is_normal() {
        result.champion_point = Some(champion_point);
    }
    result = result.with_detail(DetailKey::ChampionVelocity, champion_velocity);
    if let Some(f) = &low_freq {
        result = result
            .with_detail(DetailKey::OneXAmplitude, f.amp_1x)
            .with_detail(DetailKey::TwoXAmplitude, f.amp_2x);
    }
    if let Some(temps) = temps {
        result.temperature_notes = temperature::band_notes(temps, &config.temperature);
    }

    tracing::info!(
        machine = %ctx.machine_id,
        diagnosis = %result.diagnosis,
        severity = %result.severity,
        confidence = result.confidence,
        champion = %result.champion_label(),
        "mechanical diagnosis"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pumpdiag_types::{FluidKind, Machine};

    const BASELINE: PointReading = PointReading {
        velocity: 1.0,
        band1: 0.3,
        band2: 0.2,
        band3: 0.15,
    };

    fn ctx() -> SharedContext {
        SharedContext::new("P-101", 2950, FluidKind::Diesel, "2026-01-05 08:30:00")
    }

    fn point(machine: Machine, end: End, direction: Direction) -> MeasurementPoint {
        MeasurementPoint::new(machine, end, direction)
    }

    fn with_velocity(survey: &mut VibrationSurvey, p: MeasurementPoint, velocity: f64) {
        survey.set(p, PointReading { velocity, ..BASELINE });
    }

    fn run(survey: &VibrationSurvey, peaks: &[FftPeak]) -> DiagnosisResult {
        diagnose(survey, peaks, &ctx(), None, &ThresholdConfig::default())
    }

    #[test]
    fn test_all_baseline_is_normal() {
        let survey = VibrationSurvey::uniform(BASELINE);
        let result = run(&survey, &[]);
        assert_eq!(result.diagnosis, MechanicalCode::Normal.into());
        assert_eq!(result.severity, Severity::Low);
        assert_eq!(result.confidence, 99);
        assert_eq!(result.fault_type, FaultType::Normal);
        assert_eq!(result.champion_point, None);
        assert_eq!(result.champion_label(), "none");
    }

    #[test]
    fn test_horizontal_unbalance() {
        let mut survey = VibrationSurvey::uniform(BASELINE);
        let pump_de_h = point(Machine::Pump, End::De, Direction::Horizontal);
        with_velocity(&mut survey, pump_de_h, 8.0);
        let rpm_hz = ctx().running_speed_hz();
        let peaks = [FftPeak::new(rpm_hz, 7.5), FftPeak::new(2.0 * rpm_hz, 0.8)];

        let result = run(&survey, &peaks);
        assert_eq!(result.diagnosis, MechanicalCode::Unbalance.into());
        assert_eq!(result.severity, Severity::High);
        assert_eq!(result.fault_type, FaultType::LowFrequency);
        assert_eq!(result.champion_point, Some(pump_de_h));
        // 70 + round(7.5 / 8.0 * 20) = 89
        assert_eq!(result.confidence, 89);
        assert_eq!(result.detail(DetailKey::OneXAmplitude), 7.5);
    }

    #[test]
    fn test_axial_de_misalignment_by_opposite_machine() {
        let mut survey = VibrationSurvey::uniform(BASELINE);
        with_velocity(&mut survey, point(Machine::Motor, End::De, Direction::Axial), 6.0);
        with_velocity(&mut survey, point(Machine::Pump, End::De, Direction::Axial), 5.0);

        let result = run(&survey, &[]);
        assert_eq!(result.diagnosis, MechanicalCode::Misalignment.into());
        assert_eq!(result.severity, Severity::Medium);
        // 75 + round(5.0 / 4.5 * 10) = 86
        assert_eq!(result.confidence, 86);
    }

    #[test]
    fn test_axial_de_misalignment_by_2x_ratio() {
        let mut survey = VibrationSurvey::uniform(BASELINE);
        let pump_de_a = point(Machine::Pump, End::De, Direction::Axial);
        with_velocity(&mut survey, pump_de_a, 6.0);
        let rpm_hz = ctx().running_speed_hz();
        let peaks = [FftPeak::new(rpm_hz, 2.0), FftPeak::new(2.0 * rpm_hz, 1.5)];

        let result = run(&survey, &peaks);
        assert_eq!(result.diagnosis, MechanicalCode::Misalignment.into());
        assert_eq!(result.severity, Severity::Medium);
        assert_eq!(result.champion_point, Some(pump_de_a));
        // Motor DE axial stays at 1.0: 75 + round(1.0 / 4.5 * 10) = 77
        assert_eq!(result.confidence, 77);
    }

    #[test]
    fn test_single_vertical_looseness_by_peaks() {
        let mut survey = VibrationSurvey::uniform(BASELINE);
        with_velocity(&mut survey, point(Machine::Motor, End::Nde, Direction::Vertical), 5.0);
        let rpm_hz = ctx().running_speed_hz();
        let peaks = [FftPeak::new(rpm_hz, 0.2), FftPeak::new(2.0 * rpm_hz, 0.2)];

        let result = run(&survey, &peaks);
        assert_eq!(result.diagnosis, MechanicalCode::Looseness.into());
        assert_eq!(result.severity, Severity::Medium);
        // one high vertical: 60 + 10
        assert_eq!(result.confidence, 70);
    }

    #[test]
    fn test_single_vertical_without_peaks_is_undiagnosed() {
        let mut survey = VibrationSurvey::uniform(BASELINE);
        with_velocity(&mut survey, point(Machine::Motor, End::Nde, Direction::Vertical), 5.0);
        let rpm_hz = ctx().running_speed_hz();
        let peaks = [FftPeak::new(rpm_hz, 0.2), FftPeak::new(2.0 * rpm_hz, 0.1)];

        let result = run(&survey, &peaks);
        assert_eq!(result.diagnosis, MechanicalCode::Undiagnosed.into());
    }

    #[test]
    fn test_horizontal_unbalance_by_opposite_end() {
        let mut survey = VibrationSurvey::uniform(BASELINE);
        let motor_de_h = point(Machine::Motor, End::De, Direction::Horizontal);
        with_velocity(&mut survey, motor_de_h, 6.0);
        with_velocity(&mut survey, point(Machine::Motor, End::Nde, Direction::Horizontal), 5.0);

        let result = run(&survey, &[]);
        assert_eq!(result.diagnosis, MechanicalCode::Unbalance.into());
        assert_eq!(result.severity, Severity::Medium);
        assert_eq!(result.champion_point, Some(motor_de_h));
        // no 1x peak, so no bonus
        assert_eq!(result.confidence, 70);
    }

    #[test]
    fn test_vertical_looseness() {
        let mut survey = VibrationSurvey::uniform(BASELINE);
        with_velocity(&mut survey, point(Machine::Pump, End::Nde, Direction::Vertical), 6.0);
        with_velocity(&mut survey, point(Machine::Motor, End::De, Direction::Vertical), 5.0);

        let result = run(&survey, &[]);
        assert_eq!(result.diagnosis, MechanicalCode::Looseness.into());
        assert_eq!(result.confidence, 80);
    }

    #[test]
    fn test_axial_nde_is_undiagnosed() {
        let mut survey = VibrationSurvey::uniform(BASELINE);
        with_velocity(&mut survey, point(Machine::Pump, End::Nde, Direction::Axial), 5.0);

        let result = run(&survey, &[]);
        assert_eq!(result.diagnosis, MechanicalCode::Undiagnosed.into());
        assert_eq!(result.confidence, 40);
        assert_eq!(result.severity, Severity::Medium);
    }

    #[test]
    fn test_champion_tie_goes_to_first_point() {
        let mut survey = VibrationSurvey::uniform(BASELINE);
        let first = point(Machine::Pump, End::Nde, Direction::Horizontal);
        let second = point(Machine::Motor, End::De, Direction::Horizontal);
        with_velocity(&mut survey, second, 6.0);
        with_velocity(&mut survey, first, 6.0);
        assert_eq!(champion(&survey), (first, 6.0));
    }

    #[test]
    fn test_bearing_severe_takes_precedence() {
        let base = AccelerationBaseline::default();
        let reading = PointReading::new(1.0, 0.8, 0.7, 0.5);
        assert_eq!(
            classify_bearing(&reading, &base),
            Some((MechanicalCode::BearingSevere, Severity::High))
        );
    }

    #[test]
    fn test_bearing_fold_never_downgrades() {
        let mut survey = VibrationSurvey::uniform(BASELINE);
        // Developed/High at an early point, early/Medium at a later one
        survey.set(point(Machine::Pump, End::De, Direction::Horizontal), PointReading::new(1.0, 0.3, 0.7, 0.3));
        survey.set(point(Machine::Motor, End::Nde, Direction::Axial), PointReading::new(1.0, 0.3, 0.2, 0.4));
        assert_eq!(
            evaluate_bearings(&survey, &AccelerationBaseline::default()),
            (MechanicalCode::BearingDeveloped, Severity::High)
        );
    }

    #[test]
    fn test_bearing_fold_keeps_first_of_equal_severity() {
        let mut survey = VibrationSurvey::uniform(BASELINE);
        survey.set(point(Machine::Pump, End::De, Direction::Vertical), PointReading::new(1.0, 0.3, 0.2, 0.4));
        survey.set(point(Machine::Motor, End::De, Direction::Vertical), PointReading::new(1.0, 0.3, 0.5, 0.3));
        assert_eq!(
            evaluate_bearings(&survey, &AccelerationBaseline::default()),
            (MechanicalCode::BearingEarly, Severity::Medium)
        );
    }

    #[test]
    fn test_bearing_medium_yields_to_low_frequency_medium() {
        let mut survey = VibrationSurvey::uniform(BASELINE);
        survey.set(point(Machine::Pump, End::De, Direction::Vertical), PointReading::new(1.0, 0.3, 0.2, 0.4));
        with_velocity(&mut survey, point(Machine::Pump, End::Nde, Direction::Axial), 5.0);

        let result = run(&survey, &[]);
        assert_eq!(result.fault_type, FaultType::LowFrequency);
        assert_eq!(result.diagnosis, MechanicalCode::Undiagnosed.into());
    }

    #[test]
    fn test_bearing_high_beats_low_frequency_medium() {
        let mut survey = VibrationSurvey::uniform(BASELINE);
        survey.set(point(Machine::Motor, End::Nde, Direction::Vertical), PointReading::new(1.0, 0.9, 0.4, 0.2));
        with_velocity(&mut survey, point(Machine::Pump, End::Nde, Direction::Axial), 5.0);

        let result = run(&survey, &[]);
        assert_eq!(result.diagnosis, MechanicalCode::BearingSevere.into());
        assert_eq!(result.confidence, 85);
        assert_eq!(result.fault_type, FaultType::HighFrequency);
        assert_eq!(result.champion_point, Some(point(Machine::Pump, End::Nde, Direction::Axial)));
    }

    #[test]
    fn test_bearing_medium_alone() {
        let mut survey = VibrationSurvey::uniform(BASELINE);
        survey.set(point(Machine::Pump, End::De, Direction::Vertical), PointReading::new(1.0, 0.3, 0.2, 0.4));

        let result = run(&survey, &[]);
        assert_eq!(result.diagnosis, MechanicalCode::BearingEarly.into());
        assert_eq!(result.confidence, 75);
        assert_eq!(result.severity, Severity::Medium);
    }

    #[test]
    fn test_peak_lookup_picks_nearest_in_window() {
        let peaks = [
            FftPeak::new(47.0, 1.0),
            FftPeak::new(49.5, 2.0),
            FftPeak::new(50.4, 3.0),
        ];
        assert_eq!(peak_amplitude(&peaks, 50.0, 0.05), 3.0);
        assert_eq!(peak_amplitude(&peaks, 100.0, 0.05), 0.0);
        // 52.5 is exactly 5% away and therefore outside
        assert_eq!(peak_amplitude(&[FftPeak::new(52.5, 1.0)], 50.0, 0.05), 0.0);
    }

    #[test]
    fn test_temperature_notes_attached() {
        let survey = VibrationSurvey::uniform(BASELINE);
        let temps = BearingTemperatures::new(82.0, 60.0, 0.0, 0.0);
        let result = diagnose(&survey, &[], &ctx(), Some(&temps), &ThresholdConfig::default());
        assert_eq!(result.temperature_notes, vec!["Pump_DE: 82.0°C (Warning)".to_string()]);
        assert_eq!(result.confidence, 99);
    }
}
