use crate::errors::EngineError;
use crate::models::{Category, ClassificationResult, Entities, KnowledgeBase, ServiceKey, SessionState};

use super::picker::TemplatePicker;

pub const MEDICAL_DISCLAIMER: &str = "⚠️ **Medical Disclaimer**: I'm an AI assistant and cannot provide medical diagnoses. Please consult our healthcare professionals for personal medical advice.";

const JOKES: [&str; 4] = [
    "Why did the doctor carry a red pen? In case they needed to draw blood! 😄",
    "What's a doctor's favorite type of music? Wrap! 🎵",
    "Why are doctors so good at solving problems? They have the best prescriptions! 💊",
    "Why did the nurse have a ruler? To see how long the patient's temperature would stay down! 📏",
];

/// Produces the reply for a classified utterance and records the category
/// as the session's last intent.
pub fn dispatch(
    classification: &ClassificationResult,
    state: &mut SessionState,
    kb: &KnowledgeBase,
    picker: &dyn TemplatePicker,
) -> Result<String, EngineError> {
    state.last_intent = Some(classification.category);
    let entities = &classification.entities;

    match classification.category {
        Category::Greeting => greeting(state, kb, picker),
        Category::Appointment => Ok(appointment(kb)),
        Category::ServiceInquiry => service_inquiry(entities, kb),
        Category::DoctorInfo => doctor_info(entities, kb),
        Category::MedicalQuestion => Ok(medical_question(entities, kb)),
        Category::Emergency => Ok(emergency(kb)),
        Category::Location => Ok(location(kb)),
        Category::Hours => Ok(hours(kb)),
        Category::Cost => Ok(cost(kb)),
        Category::Feedback => Ok(feedback(kb)),
        Category::SmallTalk => Ok(small_talk(&classification.source_utterance, state, kb)),
        Category::Joke => joke(picker),
    }
}

/// Opening message for a new session.
pub fn welcome(kb: &KnowledgeBase) -> String {
    format!(
        "Welcome to {}! 🏥\n\nI'm your AI assistant. I can help you with:\n\n\
         • Booking appointments\n• Service information\n• Doctor details\n• Medical queries\n• Location & hours\n\n\
         How can I assist you today?",
        kb.clinic.name
    )
}

fn bullets<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| format!("• {}", line.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn pick<'a, T>(options: &'a [T], picker: &dyn TemplatePicker) -> Result<&'a T, EngineError> {
    let idx = picker.pick(options.len());
    options.get(idx).ok_or(EngineError::TemplateOutOfRange {
        picked: idx,
        len: options.len(),
    })
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn greeting(
    state: &SessionState,
    kb: &KnowledgeBase,
    picker: &dyn TemplatePicker,
) -> Result<String, EngineError> {
    let name = state
        .name
        .as_deref()
        .map(|n| format!(" {n}"))
        .unwrap_or_default();

    let templates = [
        format!(
            "Hello{name}! 👋 I'm {} AI Assistant. How can I help you today?",
            kb.clinic.short_name
        ),
        format!(
            "Hi there! 🏥 Welcome to {}. What can I assist you with?",
            kb.clinic.name
        ),
        "Greetings! 😊 I'm here to help with appointments, medical information, and healthcare services. How can I assist you?".to_string(),
    ];

    pick(&templates, picker).cloned()
}

fn appointment(kb: &KnowledgeBase) -> String {
    let roster = bullets(kb.doctors.iter().map(|d| format!("{} ({})", d.name, d.title)));

    format!(
        "**Booking an Appointment at {short}** 📅\n\n\
         To schedule your appointment:\n\n\
         📞 **Call**: {phone}\n\
         📍 **Visit**: {address}\n\
         ⏰ **Hours**: {hours}\n\n\
         **Our Doctors**:\n{roster}\n\n\
         Would you like information about a specific service?",
        short = kb.clinic.short_name,
        phone = kb.clinic.phone,
        address = kb.clinic.address,
        hours = kb.hours.summary,
    )
}

fn service_inquiry(entities: &Entities, kb: &KnowledgeBase) -> Result<String, EngineError> {
    let Some(key) = entities.service else {
        let listing = bullets(
            kb.services
                .iter()
                .map(|s| format!("**{}** - {}", s.display_name, s.tagline)),
        );
        return Ok(format!(
            "**{} Services** 🏥\n\n\
             We offer comprehensive medical services:\n\n{listing}\n\n\
             Which service are you interested in learning more about?",
            kb.clinic.name
        ));
    };

    let record = kb
        .get_service(key)
        .or_else(|| kb.get_service(ServiceKey::Outpatient))
        .ok_or_else(|| EngineError::KnowledgeBase("no outpatient service record".to_string()))?;

    Ok(format!(
        "**{title} Services at {short}**\n\n\
         {description}\n\n\
         **Key Features**:\n{features}\n\n\
         For more details or to schedule, call us at {phone}",
        title = capitalize(key.as_str()),
        short = kb.clinic.short_name,
        description = record.description,
        features = bullets(record.highlights.iter().take(3)),
        phone = kb.clinic.phone,
    ))
}

fn doctor_info(entities: &Entities, kb: &KnowledgeBase) -> Result<String, EngineError> {
    let name = match &entities.doctor {
        Some(name) => name.as_str(),
        None => kb
            .lead_physician()
            .map(|d| d.name.as_str())
            .ok_or_else(|| EngineError::KnowledgeBase("doctor roster is empty".to_string()))?,
    };

    if let Some(doctor) = kb.get_doctor(name) {
        return Ok(format!(
            "**{name}** 👨‍⚕️👩‍⚕️\n\n\
             **Specialty**: {}\n\
             **Experience**: {}\n\
             **Education**: {}\n\
             **Availability**: {}\n\n\
             To book an appointment with {}, call {}",
            doctor.specialty,
            doctor.experience,
            doctor.education,
            doctor.availability,
            doctor.first_name(),
            kb.clinic.phone,
        ));
    }

    let team = bullets(
        kb.doctors
            .iter()
            .map(|d| format!("**{}** - {} ({})", d.name, d.title, d.years)),
    );
    Ok(format!(
        "**Our Medical Team** 👥\n\n\
         {} has experienced healthcare professionals:\n\n{team}\n\n\
         Which doctor would you like to know more about?",
        kb.clinic.short_name
    ))
}

fn medical_question(entities: &Entities, kb: &KnowledgeBase) -> String {
    let symptoms = entities.symptoms.as_deref().unwrap_or_default();

    let body = if symptoms.is_empty() {
        format!(
            "I understand you have a health question. Our healthcare professionals at {} can provide accurate medical advice based on proper examination.\n\n\
             Call us at {} to speak with a doctor or visit our facility for comprehensive care.",
            kb.clinic.short_name, kb.clinic.phone
        )
    } else {
        symptoms
            .iter()
            .map(|symptom| match kb.symptom_advice(*symptom) {
                Some(advice) => advice.to_string(),
                None => format!(
                    "For {}: Please consult with our doctors for proper evaluation.",
                    symptom.as_str()
                ),
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    format!("{body}\n\n{MEDICAL_DISCLAIMER}")
}

fn emergency(kb: &KnowledgeBase) -> String {
    let info = kb.emergency_info();
    format!(
        "🚨 **EMERGENCY MEDICAL ASSISTANCE** 🚨\n\n\
         **IMMEDIATE ACTION REQUIRED:**\n\n\
         📞 **Call Emergency**: {}\n\
         ☎️ **Emergency Hotline**: {}\n\
         📍 **Location**: {}\n\
         ⏰ **24/7 Emergency Services Available**\n\n\
         **For Life-Threatening Emergencies:**\n{}\n\n\
         **Do not delay seeking medical attention for serious conditions!**",
        info.phone,
        info.hotline,
        kb.clinic.address,
        bullets(&info.steps),
    )
}

fn location(kb: &KnowledgeBase) -> String {
    let clinic = &kb.clinic;
    format!(
        "**{} Location** 📍\n\n\
         We are located at:\n\n\
         **{}**\n{}\n{}\n\n\
         **Landmarks**: {}\n\
         **Accessibility**: {}\n\n\
         Call us for directions: {}",
        clinic.name,
        clinic.area,
        clinic.street,
        clinic.county,
        clinic.landmarks,
        clinic.accessibility,
        clinic.phone,
    )
}

fn hours(kb: &KnowledgeBase) -> String {
    let hours = &kb.hours;
    let regular = bullets(hours.regular.iter().map(|h| format!("{}: {}", h.days, h.time)));
    let lab = bullets(hours.laboratory.iter().map(|h| format!("{}: {}", h.days, h.time)));

    format!(
        "**{} Operating Hours** ⏰\n\n\
         **Regular Consultation Hours**:\n{regular}\n\n\
         **24/7 Services Available**:\n{}\n\n\
         **Laboratory Services**:\n{lab}\n\n\
         We're here when you need us!",
        kb.clinic.short_name,
        bullets(&hours.round_the_clock),
    )
}

fn cost(kb: &KnowledgeBase) -> String {
    let prices = bullets(
        kb.costs
            .items
            .iter()
            .map(|p| format!("**{}**: {}", p.item, p.price)),
    );

    format!(
        "**{} Service Costs** 💰\n\n\
         Our services are affordable and transparent:\n\n{prices}\n\n\
         **We accept**: {}\n\n\
         For specific pricing, please call us at {} or visit our facility for accurate quotations.",
        kb.clinic.short_name, kb.costs.payment_methods, kb.clinic.phone,
    )
}

fn feedback(kb: &KnowledgeBase) -> String {
    format!(
        "**Feedback & Complaints** 💬\n\n\
         We value your feedback to improve our services:\n\n\
         📞 **Call**: {}\n\
         📧 **Email**: {}\n\
         📍 **Visit**: Speak with our patient relations desk\n\n\
         Your satisfaction is important to us!",
        kb.clinic.phone, kb.clinic.email,
    )
}

fn small_talk(utterance: &str, state: &SessionState, kb: &KnowledgeBase) -> String {
    let text = utterance.to_lowercase();
    let short = &kb.clinic.short_name;

    if text.contains("how are you") {
        "I'm functioning well, thank you! 😊 Ready to help you with healthcare services. How can I assist you today?".to_string()
    } else if text.contains("your name") {
        format!("I'm the {short} AI Assistant! I'm here to help you with medical information, appointments, and healthcare services.")
    } else if text.contains("weather") {
        "I don't have weather updates, but I recommend dressing appropriately for your health! 🌞🌧️".to_string()
    } else if text.contains("thank you") {
        match &state.name {
            Some(name) => format!("You're welcome, {name}! Is there anything else I can help you with?"),
            None => "You're welcome! Is there anything else I can help you with?".to_string(),
        }
    } else if text.contains("goodbye") {
        format!("Thank you for visiting {short}! Remember we're here for your healthcare needs. Stay healthy! 👋")
    } else {
        format!(
            "I'm here to help with {short} healthcare services! Would you like information about:\n\n\
             • Booking an appointment\n• Our medical services\n• Doctor information\n• Location and hours\n• Or something else?"
        )
    }
}

fn joke(picker: &dyn TemplatePicker) -> Result<String, EngineError> {
    let joke = pick(&JOKES, picker)?;
    Ok(format!(
        "{joke}\n\nNeed medical assistance or more information about our services?"
    ))
}
