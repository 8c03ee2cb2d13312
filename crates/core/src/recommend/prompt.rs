use super::types::SoilAssessment;

/// System preamble for the flat vegetation list call.
pub const LIST_PREAMBLE: &str = "You are a concise expert. Output ONLY the final recommendations. \
No explanations, no thinking process, no meta-commentary.";

/// System preamble for the three-section breakdown call.
pub const DETAILED_PREAMBLE: &str = "You are a concise expert. Output ONLY the final recommendations \
in the exact format requested. No explanations, no thinking process, no meta-commentary.";

/// Number of characters of the vegetation list embedded in the detailed prompt.
pub const VEGETATION_CONTEXT_CHARS: usize = 200;

/// Return at most the first `max_chars` characters of `text`.
///
/// Counts characters, not bytes, so emoji markers are never split.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Build the prompt asking for a flat `name – quantity unit` list.
pub fn build_list_prompt(assessment: &SoilAssessment) -> String {
    let soil_type = &assessment.soil_type;
    let soil_loss = assessment.soil_loss;

    format!(
        "You are a soil erosion expert. Provide ONLY the final recommendation list. \
NO explanations, NO thinking process, NO meta-commentary.

Soil Type: {soil_type}
Predicted Soil Loss: {soil_loss:.2} metric tons per year

Output format (ONLY output the list, nothing else):
🌴 Coconut – [number] trees
🌿 Pandan – [number] trees
🌳 Mahogany – [number] trees
🌾 Vetiver grass – [number] clumps
🌿 Bamboo – [number] clusters
🌱 [Species Name] – [number] [unit]

Requirements:
- List 5-10 suitable species for {soil_type}
- Include quantities based on soil loss level
- Use format: [emoji] [Name] – [number] [unit]
- NO explanations, NO \"based on\", NO \"these species\", NO thinking process
- Start immediately with the first recommendation"
    )
}

/// Build the prompt asking for the `SECTION 1:` / `SECTION 2:` / `SECTION 3:` breakdown.
///
/// Only the first [`VEGETATION_CONTEXT_CHARS`] characters of `vegetation` are embedded.
pub fn build_detailed_prompt(assessment: &SoilAssessment, vegetation: &str) -> String {
    let soil_type = &assessment.soil_type;
    let soil_loss = assessment.soil_loss;
    let vegetation = truncate_chars(vegetation, VEGETATION_CONTEXT_CHARS);

    format!(
        "You are a soil management expert. Output ONLY the final recommendations. \
NO explanations, NO thinking process, NO meta-commentary.

Soil Loss: {soil_loss:.2} metric tons/year
Soil Type: {soil_type}
Vegetation: {vegetation}

Output format (ONLY output the sections, nothing else):
SECTION 1:
• Recommendation 1
• Recommendation 2
• Recommendation 3

SECTION 2:
• Recommendation 1
• Recommendation 2
• Recommendation 3

SECTION 3:
• Recommendation 1
• Recommendation 2
• Recommendation 3

Requirements:
- SECTION 1: 3-5 bullet points for mitigating {soil_loss:.2} metric tons/year soil loss
- SECTION 2: 3-5 bullet points for managing {soil_type} soil
- SECTION 3: 3-5 bullet points for planting/maintaining the vegetation
- Use ONLY bullet points (•)
- NO explanations, NO \"based on\", NO thinking process
- Start immediately with \"SECTION 1:\"
"
    )
}
