//! Human-readable explanation of a set of scores.

pub fn generate_reasoning(aesthetic: f64, composition: u32, color: u32, balance: u32) -> String {
    let mut reasons = Vec::with_capacity(4);

    reasons.push(if aesthetic >= 85.0 {
        "Excellent overall aesthetic quality"
    } else if aesthetic >= 75.0 {
        "Strong visual appeal"
    } else {
        "Good aesthetic foundation"
    });

    if composition >= 80 {
        reasons.push("well-balanced composition");
    }
    if color >= 85 {
        reasons.push("harmonious color palette");
    }
    if balance >= 80 {
        reasons.push("excellent visual balance");
    }

    reasons.join(", ")
}
