//! Remediation text for each diagnosis.
//!
//! A pure lookup keyed by domain and code. Mechanical text names the
//! originating point, hydraulic text names the pumped fluid, and every entry
//! is worded according to severity. Codes without an entry (including the
//! mechanical `Normal`) get the domain's manual-review message.

use pumpdiag_types::{
    DiagnosisCode, DiagnosisResult, ElectricalCode, HydraulicCode, MechanicalCode, Severity,
    SharedContext,
};

/// Recommendation for any domain result.
pub fn recommend(result: &DiagnosisResult, ctx: &SharedContext) -> String {
    match result.diagnosis {
        DiagnosisCode::Mechanical(code) => mechanical(code, &result.champion_label(), result.severity),
        DiagnosisCode::Hydraulic(code) => hydraulic(code, ctx.fluid.name(), result.severity),
        DiagnosisCode::Electrical(code) => electrical(code, result.severity),
    }
}

fn unless_low(severity: Severity, urgent: &str, routine: &str) -> String {
    if severity == Severity::Low {
        routine.to_string()
    } else {
        urgent.to_string()
    }
}

fn when_high(severity: Severity, urgent: &str, routine: &str) -> String {
    if severity == Severity::High {
        urgent.to_string()
    } else {
        routine.to_string()
    }
}

pub fn mechanical(code: MechanicalCode, location: &str, severity: Severity) -> String {
    match code {
        MechanicalCode::Unbalance => format!(
            "{location} - Unbalance\n\n\
             • Perform single/dual plane balancing of the rotor\n\
             • Check: material buildup on the impeller, blade corrosion, keyway wear\n\
             • Target residual unbalance: < 4W/N (g·mm) per ISO 1940-1\n\
             • Severity: {severity} → {}",
            unless_low(severity, "Schedule balancing promptly", "Monitor trend")
        ),
        MechanicalCode::Misalignment => format!(
            "{location} - Misalignment\n\n\
             • Laser-align the pump-motor coupling\n\
             • Target tolerance: < 0.05 mm offset, < 0.05 mm/m angular\n\
             • Check: pipe strain, soft foot, coupling wear\n\
             • Severity: {severity} → {}",
            when_high(severity, "Stop and align immediately", "Schedule alignment")
        ),
        MechanicalCode::Looseness => format!(
            "{location} - Mechanical Looseness\n\n\
             • Torque-check all bolts: foundation, bearing housing, baseplate\n\
             • Check: structural cracks, worn dowel pins, grout deterioration\n\
             • Use a torque wrench to the manufacturer's specification\n\
             • Severity: {severity} → {}",
            when_high(severity, "Secure before further operation", "Schedule tightening")
        ),
        MechanicalCode::BearingEarly => format!(
            "{location} - Early Bearing Fault / Lubrication\n\n\
             • Check lubrication: grease type, interval, quantity\n\
             • Take an oil sample where applicable (particle count, viscosity)\n\
             • Trend Band 3 weekly\n\
             • Severity: {severity} → {}",
            unless_low(severity, "Replace grease and monitor closely", "Continue monitoring")
        ),
        MechanicalCode::BearingDeveloped => format!(
            "{location} - Developed Bearing Fault\n\n\
             • Schedule bearing replacement within 1-3 months\n\
             • Prepare a spare bearing (verify clearance and fit against spec)\n\
             • Monitor weekly: if Band 1 rises sharply, bring the replacement forward\n\
             • Severity: {severity} → {}",
            when_high(severity, "Plan a shutdown promptly", "Raise a work order")
        ),
        MechanicalCode::BearingSevere => format!(
            "{location} - Severe Bearing Damage\n\n\
             • RISK OF CATASTROPHIC FAILURE - consider immediate shutdown\n\
             • If operation continues: monitor hourly, prepare emergency replacement\n\
             • Investigate root cause: lubrication, installation, loading\n\
             • Severity: HIGH → Action required within 24 hours"
        ),
        MechanicalCode::Normal | MechanicalCode::Undiagnosed => "Inconsistent Pattern\n\n\
             • Data does not match the standard mechanical rules\n\
             • Possible causes: multi-fault interaction, measurement error, or an uncommon fault\n\
             • Pattern inconsistent, manual review required by a Vibration Analyst Level II+ with full spectrum review"
            .to_string(),
    }
}

pub fn hydraulic(code: HydraulicCode, fluid: &str, severity: Severity) -> String {
    match code {
        HydraulicCode::Cavitation => format!(
            "{fluid} - Cavitation Risk\n\n\
             • Raise suction pressure or lower fluid temperature\n\
             • Check: clogged strainer, valve position, NPSH margin\n\
             • Target NPSH margin: > 0.5 m for {fluid}\n\
             • Severity: {severity} → {}",
            when_high(
                severity,
                "Evaluate immediate shutdown if NPSH margin < 0.3 m",
                "Monitor intensively"
            )
        ),
        HydraulicCode::ImpellerWear => format!(
            "{fluid} - Impeller Wear / Internal Clearance\n\n\
             • Schedule inspection of impeller and wear rings\n\
             • Measure internal clearance against OEM spec\n\
             • Consider the effect of fluid viscosity on slip loss\n\
             • Severity: {severity} → {}",
            unless_low(severity, "Prepare a spare impeller", "Trend efficiency")
        ),
        HydraulicCode::SystemResistanceHigh => format!(
            "{fluid} - System Resistance Higher Than Design\n\n\
             • Check discharge valve position, clogged lines, filter pressure drop\n\
             • Verify P&ID against as-built condition\n\
             • Evaluate whether the operating point is still within the acceptable range\n\
             • Severity: {severity} → {}",
            when_high(severity, "Adjust valve / clean line promptly", "Schedule a system review")
        ),
        HydraulicCode::EfficiencyDrop => format!(
            "{fluid} - Efficiency Degradation\n\n\
             • Investigate: mechanical loss vs hydraulic loss vs fluid property mismatch\n\
             • Severity: {severity} → {}",
            unless_low(severity, "Plan overhaul within 1-3 months", "Monitor monthly")
        ),
        HydraulicCode::NormalOperation => format!(
            "{fluid} - Normal Operation\n\n\
             • All parameters within acceptable limits (±5% of design)\n\
             • Record this data as the baseline for trend monitoring\n\
             • Severity: Low → Continue routine monitoring"
        ),
        HydraulicCode::Undiagnosed => "Inconsistent Pattern\n\n\
             • Hydraulic data does not match the standard rules\n\
             • Pattern inconsistent, manual review required: verify field data and cross-check with electrical/mechanical data"
            .to_string(),
    }
}

pub fn electrical(code: ElectricalCode, severity: Severity) -> String {
    let voltage_action = when_high(severity, "Coordinate with the electrical team promptly", "Monitor voltage trend");
    match code {
        ElectricalCode::UnderVoltage => format!(
            "Under Voltage Condition\n\n\
             • Check supply voltage at the MCC: possible transformer tap / cable voltage drop\n\
             • Verify motor rated voltage against actual operating voltage\n\
             • Severity: {severity} → {voltage_action}"
        ),
        ElectricalCode::OverVoltage => format!(
            "Over Voltage Condition\n\n\
             • Check supply voltage at the MCC: possible transformer tap issue\n\
             • Verify motor rated voltage against actual operating voltage\n\
             • Severity: {severity} → {voltage_action}"
        ),
        ElectricalCode::VoltageUnbalance => format!(
            "Voltage Unbalance Detected\n\n\
             • Check three-phase supply balance at the source: possible single-phase loading\n\
             • Inspect: loose connections, corroded terminals, faulty breaker\n\
             • Severity: {severity} → {}",
            unless_low(severity, "Balance the supply before mechanical damage occurs", "Monitor monthly")
        ),
        ElectricalCode::CurrentUnbalance => format!(
            "Current Unbalance Detected\n\n\
             • Investigate: winding fault, rotor bar issue, or supply problem\n\
             • Check insulation resistance and winding resistance balance\n\
             • Severity: {severity} → {}",
            unless_low(severity, "Schedule an electrical inspection", "Continue monitoring")
        ),
        ElectricalCode::OverLoad => format!(
            "Over Load Condition\n\n\
             • Motor operating above FLA rating\n\
             • Verify: process load, mechanical binding, or electrical issue\n\
             • Severity: {severity} → {}",
            when_high(severity, "Reduce load immediately", "Monitor trend closely")
        ),
        ElectricalCode::UnderLoad => "Under Load Condition\n\n\
             • Motor operating below 50% FLA\n\
             • Verify: process demand, pump sizing, or system resistance\n\
             • Severity: Low → Review operating point against BEP"
            .to_string(),
        ElectricalCode::NormalElectrical => "Normal Electrical Condition\n\n\
             • Voltage unbalance < 2%, current unbalance < 5%, within rated limits\n\
             • Severity: Low → Continue routine electrical monitoring"
            .to_string(),
        ElectricalCode::Undiagnosed => "Inconsistent Pattern\n\n\
             • Electrical data does not match the standard rules\n\
             • Pattern inconsistent, manual review required: verify with a power quality analyzer and cross-check other domains"
            .to_string(),
    }
}
