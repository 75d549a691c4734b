//! Canned replies for every intent and for the onboarding flow.
//!
//! Bodies use a small markup: `**text**` is bold and `\n` is a line break.
//! Rendering that markup is the front end's job.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use super::intent::Intent;

/// Upper bound on quick replies attached to a single message.
pub const MAX_QUICK_REPLIES: usize = 6;

/// Chips offered by the welcome message, after the name is captured, and
/// with every fallback reply.
pub const MAIN_MENU: [&str; 6] = [
    "💻 Desarrollo Web",
    "📱 Apps Móviles",
    "🛠️ Sistemas",
    "🛒 E-commerce",
    "💰 Presupuesto",
    "📞 Contacto",
];

/// Replies for input no rule recognizes. One is picked at random per turn.
pub const FALLBACK_REPLIES: [&str; 3] = [
    "🤔 Interesante pregunta. Para darte la mejor respuesta, ¿podrías ser más específico sobre qué tipo de desarrollo te interesa?",
    "💡 ¡Perfecto! Me gustaría ayudarte mejor. ¿Estás buscando información sobre desarrollo web, apps móviles, o sistemas de gestión?",
    "🎯 Excelente consulta. Para orientarte mejor, ¿tu proyecto es para una empresa nueva o ya establecida?",
];

const WELCOME: &str = "¡Hola! 👋 Soy el asistente virtual de Kodo Labs. Estoy aquí para ayudarte con información sobre nuestros servicios de desarrollo de software.";

const ASK_NAME: &str = "¡Perfecto! Para brindarte una mejor atención, ¿cuál es tu nombre?";

const WEB_DEV: &str = "🌐 ¡Excelente elección! Nuestro desarrollo web incluye:\n\n\
✅ Sitios web modernos y responsivos\n\
✅ React, Next.js y tecnologías actuales\n\
✅ SEO optimizado\n\
✅ Hosting y dominio incluido\n\
✅ Panel de administración\n\n\
¿Te gustaría conocer más detalles sobre algún aspecto específico?";

const MOBILE_DEV: &str = "📱 ¡Perfecto! Desarrollamos apps que destacan:\n\n\
✅ Apps nativas iOS y Android\n\
✅ React Native para máxima eficiencia\n\
✅ Diseño UX/UI profesional\n\
✅ Integración con APIs\n\
✅ Publicación en stores incluida\n\n\
¿Qué tipo de app tienes en mente?";

const SYSTEM_DEV: &str = "⚙️ ¡Sistemas que transforman empresas! Ofrecemos:\n\n\
✅ CRM y ERP personalizados\n\
✅ Gestión de inventario\n\
✅ Automatización de procesos\n\
✅ Reportes inteligentes\n\
✅ Acceso multi-usuario\n\n\
¿Qué procesos necesitas automatizar?";

const ECOMMERCE: &str = "🛒 ¡Tiendas online que venden! Incluimos:\n\n\
✅ Catálogo de productos completo\n\
✅ Carrito y checkout optimizado\n\
✅ Pasarelas de pago seguras\n\
✅ Panel administrativo\n\
✅ Integración con redes sociales\n\n\
¿Qué productos planeas vender?";

const PRICING: &str = "💰 Nuestros precios son competitivos y transparentes:\n\n\
🌐 **Sitio Web:** Desde $150.000 ARS\n\
📱 **App Móvil:** Desde $250.000 ARS\n\
⚙️ **Sistema:** Desde $300.000 ARS\n\
🛒 **E-commerce:** Desde $200.000 ARS\n\n\
*Precios finales según funcionalidades específicas*\n\n\
¿Te gustaría un presupuesto personalizado?";

const CONTACT: &str = "📞 ¡Conectemos! Puedes contactarnos por:\n\n\
📧 **Email:** contacto@kodolabs.com\n\
📱 **WhatsApp:** +54 9 221 XXX-XXXX\n\
🕒 **Horarios:** Lun-Vie 9:00-19:00\n\
📍 **Ubicación:** La Plata, Buenos Aires\n\n\
También puedo ayudarte a completar un formulario de contacto. ¿Prefieres que te llamen o envías un WhatsApp?";

const TIMELINE: &str = "⏱️ **Tiempos de desarrollo típicos:**\n\n\
🌐 **Sitio Web:** 2-4 semanas\n\
📱 **App Móvil:** 6-12 semanas\n\
⚙️ **Sistema:** 8-16 semanas\n\
🛒 **E-commerce:** 4-8 semanas\n\n\
*Los tiempos pueden variar según la complejidad*\n\n\
¿Tienes alguna fecha límite en mente?";

const ABOUT: &str = "👨‍💻 **Sobre Kodo Labs:**\n\n\
🎓 Estudiantes de Ingeniería en Sistemas\n\
💡 Especializados en tecnologías modernas\n\
🤝 Enfoque en PyMEs y startups\n\
💰 Precios competitivos\n\
🌟 Calidad profesional\n\n\
Creemos en crear relaciones ganar-ganar: tú obtienes digitalización de calidad, nosotros ganamos experiencia real.";

const WEB_DEV_REPLIES: &[&str] = &["💰 Precios", "⏱️ Tiempos", "🎨 Diseños", "📞 Contactar"];
const MOBILE_DEV_REPLIES: &[&str] = &["🛒 E-commerce", "📊 Corporativa", "🎮 Entretenimiento", "💬 Social"];
const SYSTEM_DEV_REPLIES: &[&str] = &["📦 Inventario", "👥 Clientes", "💰 Ventas", "📊 Reportes"];
const ECOMMERCE_REPLIES: &[&str] = &["👗 Ropa", "🍕 Comida", "📚 Servicios", "🎁 Otros"];
const PRICING_REPLIES: &[&str] = &["📋 Presupuesto", "📞 Consulta", "ℹ️ Más info"];
const CONTACT_REPLIES: &[&str] = &["📱 WhatsApp", "📞 Que me llamen", "📧 Email", "📋 Formulario"];
const TIMELINE_REPLIES: &[&str] = &["🚀 Urgente", "📅 1-3 meses", "🕐 +3 meses", "🤔 Flexible"];
const ABOUT_REPLIES: &[&str] = &["🔍 Ver portfolio", "📞 Contactar", "💰 Precios"];

/// One bot message: body text plus the chips offered underneath it.
///
/// A chip's label is resubmitted verbatim as the next utterance when chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseDescriptor {
    pub body: String,
    pub quick_replies: Vec<String>,
}

impl ResponseDescriptor {
    pub fn new(body: impl Into<String>, quick_replies: &[&str]) -> Self {
        debug_assert!(quick_replies.len() <= MAX_QUICK_REPLIES);
        Self {
            body: body.into(),
            quick_replies: quick_replies.iter().map(|reply| reply.to_string()).collect(),
        }
    }

    pub fn text(body: impl Into<String>) -> Self {
        Self::new(body, &[])
    }
}

/// Message shown when a session opens.
pub fn welcome() -> ResponseDescriptor {
    ResponseDescriptor::new(WELCOME, &MAIN_MENU)
}

pub fn ask_name() -> ResponseDescriptor {
    ResponseDescriptor::text(ASK_NAME)
}

pub fn greet_user(name: &str) -> ResponseDescriptor {
    ResponseDescriptor::new(
        format!("¡Mucho gusto, {name}! 😊 ¿En qué puedo ayudarte hoy?"),
        &MAIN_MENU,
    )
}

/// The fixed reply for a recognized intent. `None` for [`Intent::Unmatched`],
/// which has no single reply.
pub fn fixed_response(intent: Intent) -> Option<ResponseDescriptor> {
    let (body, quick_replies) = match intent {
        Intent::WebDev => (WEB_DEV, WEB_DEV_REPLIES),
        Intent::MobileDev => (MOBILE_DEV, MOBILE_DEV_REPLIES),
        Intent::SystemDev => (SYSTEM_DEV, SYSTEM_DEV_REPLIES),
        Intent::Ecommerce => (ECOMMERCE, ECOMMERCE_REPLIES),
        Intent::Pricing => (PRICING, PRICING_REPLIES),
        Intent::Contact => (CONTACT, CONTACT_REPLIES),
        Intent::Timeline => (TIMELINE, TIMELINE_REPLIES),
        Intent::About => (ABOUT, ABOUT_REPLIES),
        Intent::Unmatched => return None,
    };
    Some(ResponseDescriptor::new(body, quick_replies))
}

/// Builds the reply for an intent. Only [`Intent::Unmatched`] consumes
/// randomness, picking one of [`FALLBACK_REPLIES`].
pub fn respond<R: Rng + ?Sized>(intent: Intent, rng: &mut R) -> ResponseDescriptor {
    fixed_response(intent).unwrap_or_else(|| {
        let body = FALLBACK_REPLIES
            .choose(rng)
            .copied()
            .unwrap_or(FALLBACK_REPLIES[0]);
        ResponseDescriptor::new(body, &MAIN_MENU)
    })
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::dialogue::intent::RULES;

    #[test]
    fn every_recognized_intent_has_a_fixed_reply() {
        for (intent, _) in RULES {
            let response = fixed_response(*intent).expect("recognized intent has a reply");
            assert!(!response.body.is_empty());
            assert!(!response.quick_replies.is_empty());
            assert!(response.quick_replies.len() <= MAX_QUICK_REPLIES);
        }
        assert_eq!(fixed_response(Intent::Unmatched), None);
    }

    #[test]
    fn web_dev_reply_has_four_chips_in_order() {
        let response = fixed_response(Intent::WebDev).unwrap();
        assert!(response.body.starts_with("🌐 ¡Excelente elección!"));
        assert_eq!(
            response.quick_replies,
            vec!["💰 Precios", "⏱️ Tiempos", "🎨 Diseños", "📞 Contactar"]
        );
    }

    #[test]
    fn pricing_body_keeps_bold_markup_and_line_breaks() {
        let response = fixed_response(Intent::Pricing).unwrap();
        assert!(response.body.contains("🌐 **Sitio Web:** Desde $150.000 ARS\n"));
        assert!(response.body.contains("\n\n*Precios finales"));
    }

    #[test]
    fn unmatched_picks_a_fallback_with_main_menu() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let response = respond(Intent::Unmatched, &mut rng);
            assert!(FALLBACK_REPLIES.contains(&response.body.as_str()));
            assert_eq!(response.quick_replies, MAIN_MENU.to_vec());
        }
    }

    #[test]
    fn same_seed_picks_same_fallback() {
        let first = respond(Intent::Unmatched, &mut StdRng::seed_from_u64(42));
        let second = respond(Intent::Unmatched, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn greeting_uses_the_name() {
        let response = greet_user("Juan");
        assert_eq!(response.body, "¡Mucho gusto, Juan! 😊 ¿En qué puedo ayudarte hoy?");
        assert_eq!(response.quick_replies, MAIN_MENU.to_vec());
    }

    #[test]
    fn ask_name_has_no_chips() {
        let response = ask_name();
        assert!(response.body.contains("¿cuál es tu nombre?"));
        assert!(response.quick_replies.is_empty());
    }
}
