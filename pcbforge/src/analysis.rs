//! Requirement analysis and design suggestions.
//!
//! Keyword-presence checks over the advisory requirements text,
//! combined with component-type presence, drive two things: the
//! fixed advisory strings attached to a design, and the essential
//! components appended when a detected need has no matching part.

use crate::library::ComponentLibrary;
use crate::model::Component;

const POWER_WORDS: [&str; 7] = ["power", "voltage", "regulator", "battery", "supply", "v", "volt"];
const MCU_WORDS: [&str; 6] = ["microcontroller", "arduino", "mcu", "processor", "control", "atmega"];
const LED_WORDS: [&str; 5] = ["led", "indicator", "light", "display", "blink"];
const SENSOR_WORDS: [&str; 7] = [
    "sensor", "measure", "detect", "monitor", "temperature", "humidity", "pressure",
];
const MOTOR_WORDS: [&str; 5] = ["motor", "driver", "actuator", "servo", "stepper"];
const CONNECTIVITY_WORDS: [&str; 8] = [
    "connect", "interface", "usb", "bluetooth", "wireless", "i2c", "spi", "uart",
];

/// Circuit needs inferred from the requirements text and the supplied
/// component list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CircuitNeeds {
    pub power_regulation: bool,
    pub microcontroller: bool,
    pub led_indicators: bool,
    pub sensors: bool,
    pub motor_control: bool,
    pub connectivity: bool,
}

impl CircuitNeeds {
    /// Detect needs: keyword presence in the lowercased requirements
    /// text, OR'd with presence of a matching component type.
    pub fn detect(requirements: &str, components: &[Component]) -> Self {
        let text = requirements.to_lowercase();
        // Plain substring presence, like the upstream requirement
        // analyzer; the advisory text is free-form.
        let has_word = |candidates: &[&str]| candidates.iter().any(|w| text.contains(w));
        let has_type = |tag: &str| {
            components
                .iter()
                .any(|c| c.kind.to_lowercase().contains(tag))
        };

        Self {
            power_regulation: has_word(&POWER_WORDS) || has_type("regulator"),
            microcontroller: has_word(&MCU_WORDS) || has_type("microcontroller"),
            led_indicators: has_word(&LED_WORDS) || has_type("led"),
            sensors: has_word(&SENSOR_WORDS) || has_type("sensor"),
            motor_control: has_word(&MOTOR_WORDS),
            connectivity: has_word(&CONNECTIVITY_WORDS) || has_type("connector"),
        }
    }

    /// Fixed advisory strings for the detected needs.
    pub fn suggestions(&self) -> Vec<String> {
        let mut suggestions = Vec::new();
        if self.power_regulation {
            suggestions.push("Consider adding reverse polarity protection for power input".to_string());
            suggestions.push("Add proper filtering capacitors for voltage regulation".to_string());
        }
        if self.microcontroller {
            suggestions.push("Add decoupling capacitors near the microcontroller power pins".to_string());
            suggestions.push("Include a reset circuit with pull-up resistor".to_string());
        }
        if self.sensors {
            suggestions.push("Add filtering capacitors near analog sensor inputs to reduce noise".to_string());
            suggestions.push("Consider adding voltage reference for accurate measurements".to_string());
        }
        if self.motor_control {
            suggestions.push("Use separate power and ground planes for motor circuits".to_string());
            suggestions.push("Add flyback diodes for inductive loads".to_string());
        }
        suggestions
    }
}

/// Append the essential components a detected need implies when no
/// component of that type is present yet. Added parts are enriched
/// from the library like caller-supplied ones.
pub fn augment_components(
    components: &mut Vec<Component>,
    needs: &CircuitNeeds,
    library: &ComponentLibrary,
) {
    let has_type = |components: &[Component], tag: &str| {
        components.iter().any(|c| c.kind.eq_ignore_ascii_case(tag))
    };

    let mut added: Vec<Component> = Vec::new();
    if needs.power_regulation && !has_type(components, "regulator") {
        added.push(Component::new("regulator", "Power Regulator"));
        added.push(Component::new("capacitor", "Input Capacitor"));
        added.push(Component::new("capacitor", "Output Capacitor"));
    }
    if needs.microcontroller && !has_type(components, "microcontroller") {
        added.push(Component::new("microcontroller", "ATmega328P"));
        added.push(Component::new("capacitor", "Decoupling Capacitor"));
    }
    if needs.led_indicators && !has_type(components, "led") {
        added.push(Component::new("led", "Status LED"));
        added.push(Component::new("resistor", "LED Current Limiter"));
    }

    if !added.is_empty() {
        tracing::info!("appending {} essential components", added.len());
        library.enrich(&mut added);
        components.append(&mut added);
    }
}
