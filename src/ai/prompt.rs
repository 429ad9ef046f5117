//! Form payloads for each AI feature and the prompts built from them.

use base64::{Engine, engine::general_purpose::STANDARD};
use json::Value;
use serde::{Deserialize, Serialize};

use super::{Part, json_block};
use crate::{config::AiConfig, prelude::*, sv::ActivityKind};

const NOT_SPECIFIED: &str = "Not specified";

/// An AI feature request: validated, turned into prompt parts, and recorded
/// in the analysis history once answered.
pub trait Prompt: Serialize {
  const KIND: ActivityKind;

  /// Validates the form and builds the prompt. Nothing is sent when this
  /// fails.
  fn parts(&self, config: &AiConfig) -> Result<Vec<Part>>;

  /// What gets stored as the analysis input.
  fn record(&self) -> Value {
    json::to_value(self).unwrap_or(Value::Null)
  }

  /// What gets stored as the analysis result.
  fn result(reply: &str) -> Value {
    json::json!({ "analysis": reply })
  }
}

fn or_unspecified(value: &Option<String>) -> &str {
  value.as_deref().map(str::trim).filter(|v| !v.is_empty()).unwrap_or(NOT_SPECIFIED)
}

fn number_or_unspecified<T: ToString>(value: Option<T>) -> String {
  value.map(|v| v.to_string()).unwrap_or_else(|| NOT_SPECIFIED.into())
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str> {
  value
    .as_deref()
    .map(str::trim)
    .filter(|v| !v.is_empty())
    .ok_or_else(|| Error::validation(format!("`{field}` is required")))
}

fn required_number<T: Copy>(value: Option<T>, field: &str) -> Result<T> {
  value.ok_or_else(|| Error::validation(format!("`{field}` is required")))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomCheck {
  #[serde(default)]
  pub symptoms: String,
  pub age: Option<u32>,
  pub gender: Option<String>,
  pub duration: Option<String>,
}

impl Prompt for SymptomCheck {
  const KIND: ActivityKind = ActivityKind::SymptomCheck;

  fn parts(&self, _: &AiConfig) -> Result<Vec<Part>> {
    let symptoms = self.symptoms.trim();
    if symptoms.is_empty() {
      return Err(Error::validation("Please describe your symptoms"));
    }

    let prompt = format!(
      "You are an experienced clinician giving a preliminary symptom \
       assessment.\n\n\
       Symptoms: {symptoms}\n\
       Age: {}\n\
       Gender: {}\n\
       Duration: {}\n\n\
       Cover, in order:\n\
       1. Possible conditions ranked by likelihood\n\
       2. Recommended immediate actions\n\
       3. When to seek medical attention\n\
       4. Self-care suggestions\n\
       5. Warning signs to watch for\n\n\
       State clearly that this is a preliminary AI-generated analysis and \
       that a healthcare professional must be consulted for diagnosis and \
       treatment.",
      number_or_unspecified(self.age),
      or_unspecified(&self.gender),
      or_unspecified(&self.duration),
    );

    Ok(vec![Part::text(prompt)])
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAnalysis {
  pub mime_type: String,
  /// Base64 image bytes, with or without a `data:<mime>;base64,` prefix
  pub data: String,
}

impl ImageAnalysis {
  fn payload(&self) -> &str {
    let data = match self.data.split_once(";base64,") {
      Some((prefix, rest)) if prefix.starts_with("data:") => rest,
      _ => &self.data,
    };
    data.trim()
  }
}

impl Prompt for ImageAnalysis {
  const KIND: ActivityKind = ActivityKind::ImageAnalysis;

  fn parts(&self, config: &AiConfig) -> Result<Vec<Part>> {
    if !self.mime_type.starts_with("image/") {
      return Err(Error::validation(
        "Please select a valid image file (JPG, PNG, etc.)",
      ));
    }

    let payload = self.payload();
    let bytes = STANDARD
      .decode(payload)
      .map_err(|_| Error::validation("Image data is not valid base64"))?;

    if bytes.is_empty() {
      return Err(Error::validation("Image is empty"));
    }
    if bytes.len() > config.max_image_bytes {
      return Err(Error::validation(format!(
        "Image is larger than {} bytes",
        config.max_image_bytes
      )));
    }

    let prompt = "You are a medical practitioner experienced in reading \
                  medical images. Identify anomalies, diseases or other \
                  health issues visible in the image and describe findings, \
                  next steps and recommendations in detail.\n\n\
                  Only respond if the image shows a human body or a health \
                  issue. If the image is unclear, answer: 'Unable to \
                  determine based on the provided image.'\n\n\
                  Always end with: 'Consult with a Doctor before making any \
                  decisions.'";

    Ok(vec![Part::text(prompt), Part::image(&self.mime_type, payload)])
  }

  fn record(&self) -> Value {
    // the image itself is not kept
    json::json!({
      "mime_type": self.mime_type,
      "size": STANDARD.decode(self.payload()).map(|b| b.len()).unwrap_or(0),
    })
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionPlan {
  pub age: Option<u32>,
  /// Kilograms
  pub weight: Option<f64>,
  /// Centimetres
  pub height: Option<f64>,
  pub activity_level: Option<String>,
  pub goals: Option<String>,
  pub dietary: Option<String>,
  pub allergies: Option<String>,
}

impl Prompt for NutritionPlan {
  const KIND: ActivityKind = ActivityKind::NutritionPlan;

  fn parts(&self, _: &AiConfig) -> Result<Vec<Part>> {
    let age = required_number(self.age, "age")?;
    let weight = required_number(self.weight, "weight")?;
    let height = required_number(self.height, "height")?;

    let goals = self.goals.as_deref().filter(|g| !g.trim().is_empty());
    let allergies = self.allergies.as_deref().filter(|a| !a.trim().is_empty());

    let prompt = format!(
      "You are a certified nutritionist. Build a complete nutrition plan \
       for:\n\n\
       - Age: {age} years\n\
       - Weight: {weight} kg\n\
       - Height: {height} cm\n\
       - Activity level: {}\n\
       - Goals: {}\n\
       - Dietary preferences: {}\n\
       - Allergies/restrictions: {}\n\n\
       Include daily caloric needs, a macronutrient breakdown, a 7-day meal \
       plan following Ayurvedic principles, portioned food recommendations, \
       foods to avoid, hydration guidelines, supplement suggestions, meal \
       timing, healthy snacks and meal preparation tips.\n\n\
       Format the answer in clear sections.",
      or_unspecified(&self.activity_level),
      goals.unwrap_or("General health"),
      or_unspecified(&self.dietary),
      allergies.unwrap_or("None"),
    );

    Ok(vec![Part::text(prompt)])
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendations {
  pub age: Option<u32>,
  pub gender: Option<String>,
  pub health_goals: Option<String>,
  pub height: Option<f64>,
  pub weight: Option<f64>,
  pub activity_level: Option<String>,
  pub current_conditions: Option<String>,
  pub dietary_restrictions: Option<String>,
}

const RECOMMENDATION_SCHEMA: &str = r#"{
  "diet": { "title": "Diet and Nutrition", "recommendations": [], "foods_to_include": [], "foods_to_avoid": [] },
  "exercise": { "title": "Exercise and Physical Activity", "recommendations": [], "suggested_activities": [] },
  "sleep": { "title": "Sleep and Recovery", "recommendations": [] },
  "stress": { "title": "Stress Management", "recommendations": [], "techniques": [] },
  "lifestyle": { "title": "Lifestyle Modifications", "recommendations": [] },
  "ayurveda": { "title": "Ayurvedic Remedies", "recommendations": [], "herbs": [] }
}"#;

impl Prompt for Recommendations {
  const KIND: ActivityKind = ActivityKind::HealthRecommendation;

  fn parts(&self, _: &AiConfig) -> Result<Vec<Part>> {
    let age = required_number(self.age, "age")?;
    let gender = required(&self.gender, "gender")?;
    let goals = required(&self.health_goals, "health_goals")?;

    let conditions = self
      .current_conditions
      .as_deref()
      .filter(|c| !c.trim().is_empty())
      .unwrap_or("None specified");
    let restrictions = self
      .dietary_restrictions
      .as_deref()
      .filter(|r| !r.trim().is_empty())
      .unwrap_or("None specified");

    let prompt = format!(
      "As a health and wellness expert, give personalized recommendations \
       for this profile:\n\n\
       Age: {age}\n\
       Gender: {gender}\n\
       Height: {}\n\
       Weight: {}\n\
       Activity level: {}\n\
       Health goals: {goals}\n\
       Current health conditions: {conditions}\n\
       Dietary restrictions: {restrictions}\n\n\
       Answer with a JSON object shaped like this, filling every list:\n\
       {RECOMMENDATION_SCHEMA}\n\n\
       Always include a disclaimer about consulting healthcare \
       professionals.",
      number_or_unspecified(self.height),
      number_or_unspecified(self.weight),
      or_unspecified(&self.activity_level),
    );

    Ok(vec![Part::text(prompt)])
  }

  fn result(reply: &str) -> Value {
    json_block(reply)
  }
}
