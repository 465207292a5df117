//! Built-in bilingual (English / Spanish) pattern sources.
//!
//! Sources are written against normalized text: lowercase, accents stripped.
//! `¿` and `¡` survive normalization, so patterns never anchor on them.

use super::PatternCategory;

const IMMEDIACY: &[&str] = &[
    r"\blimited (spots|spaces|time|availability|offer|slots)\b",
    r"\btoday only\b",
    r"\b(act|call|book|apply|text|message us) now\b",
    r"\b(don'?t|do not) (wait|miss out)\b",
    r"\b(last|final) (chance|spots?|units?|days?)\b",
    r"\b(hurry|urgent|asap|immediately)\b",
    r"\bonly \d+ (spots|left|remaining|homes|units|slots)\b",
    r"\b(ends|expires) (soon|today|tonight|this week)\b",
    r"\bsame[- ]day\b",
    r"\bcupos limitados\b",
    r"\b(solo|solamente) (hoy|por hoy)\b",
    r"\b(llama|llame|agenda|escribe|escribenos|aplica) (ya|ahora)\b",
    r"\bno (esperes|espere|te lo pierdas)\b",
    r"\bultim[oa]s? (oportunidad|cupos|unidades|dias)\b",
    r"\b(urgente|de inmediato)\b",
    r"\b(termina|vence) (pronto|hoy)\b",
    r"\bpor tiempo limitado\b",
    r"\b(solo )?quedan (pocos|pocas|\d+)\b",
];

const QUALIFICATION: &[&str] = &[
    r"\b(must|need to|have to) qualify\b",
    r"\bpre-?(qualif(y|ied|ication)|approv(al|ed))\b",
    r"\brequirements?\b",
    r"\beligib(le|ility)\b",
    r"\b(credit score|minimum income|proof of income|down payment)\b",
    r"\bif you qualify\b",
    r"\brequisitos?\b",
    r"\bprecalifica\w*\b",
    r"\bpre-?aprobad[oa]s?\b",
    r"\bsi (calificas|califica|calificar)\b",
    r"\b(historial crediticio|ingresos minimos|enganche|cuota inicial)\b",
];

const QUALIFICATION_EXTRA: &[&str] = &[
    r"\bfinanc(ing|e options)\b",
    r"\b(no|bad|low) credit\b",
    r"\bfirst[- ]time (home ?)?buyers?\b",
    r"\b(see|find out|check) if you (qualify|are eligible)\b",
    r"\b(homeowners? only|must own)\b",
    r"\bfinanciamiento\b",
    r"\b(sin|mal) credito\b",
    r"\bprimera vivienda\b",
    r"\b(solo|unicamente) propietarios\b",
];

const CONSULT_BOOKING: &[&str] = &[
    r"\b(book|schedule|request) (a|an|your) (free )?(call|consultation|demo|appointment|visit|showing|tour|estimate|inspection)\b",
    r"\bfree (consultation|consult|estimate|quote|assessment|inspection)\b",
    r"\b(book|schedule) (now|today|online)\b",
    r"\b(agenda|agende|reserva|programa) (tu|una|su) (cita|llamada|consulta|visita|asesoria)\b",
    r"\b(consulta|asesoria|cotizacion|evaluacion) gratis\b",
    r"\b(cita|consulta) gratuita\b",
];

const FOLLOWUP: &[&str] = &[
    r"\bwe('ll| will) (reach out|contact you|call you|get back|be in touch)\b",
    r"\b(expect|receive) a (call|text|message)\b",
    r"\ban? (agent|advisor|specialist|representative) will (contact|call|reach)\b",
    r"\bwithin \d+ (hours?|minutes?|business days?)\b",
    r"\b(te|le|los) (contactaremos|llamaremos|escribiremos)\b",
    r"\bun (asesor|agente|especialista) (te|le|se) (contactara|llamara|comunicara)\b",
    r"\ben menos de \d+ (horas|minutos)\b",
];

const MULTISTEP: &[&str] = &[
    r"\b(answer|take) (a few|some|\d+|these) (quick |short )?questions\b",
    r"\b(complete|fill out|fill in) (the|our|this|a) (short |quick )?(form|survey|quiz|application)\b",
    r"\b(\d+|few|simple|easy) (quick |simple |easy )?steps\b",
    r"\bstep \d\b",
    r"\b(take|start) (the|our) (quiz|assessment)\b",
    r"\b(responde|contesta) (unas|algunas|\d+) preguntas\b",
    r"\b(completa|llena|rellena) (el|este|nuestro) (formulario|cuestionario)\b",
    r"\b(\d+|pocos|simples) pasos\b",
];

const PRICE_DISCOUNT: &[&str] = &[
    r"[$\x{20AC}\x{A3}]\s?\d",
    r"\d+(\.\d+)?\s?% ?(off|discount|descuento)\b",
    r"\b\d+\s?(usd|dollars|pesos|eur)\b",
    r"\b(discounts?|savings|promos?|coupons?)\b",
    r"\b(on sale|sale price|sale ends)\b",
    r"\b(starting at|as low as) \$?\d",
    r"\b(price|pricing|priced)\b",
    r"\b(descuentos?|promocion|precios?|ahorra|rebajas?)\b",
    r"\bofertas? (de precio|con descuento|desde \$?\d|de \$?\d)",
    r"\bdesde \$?\d",
];

const ADVISOR_LANGUAGE: &[&str] = &[
    r"\b(advisor|adviser|specialist|expert|consultant|realtor|broker|coach|counselor|planner)s?\b",
    r"\b(our|your) (local )?team\b",
    r"\b(asesor|asesora|asesores|especialistas?|expert[oa]s?|consultor|corredor)\b",
    r"\bnuestro equipo\b",
];

const SERVICE_BREADTH: &[&str] = &[
    r"\b(all|any) (of )?(your )?(types? of )?(needs|services|projects)\b",
    r"\b(full[- ]service|one[- ]stop|everything you need|wide range|complete solutions?)\b",
    r"\b(residential and commercial|commercial and residential)\b",
    r"\b(and|y) (much )?mas\b",
    r"\band (much )?more\b",
    r"\b(solutions|services) for (every|all)\b",
    r"\b(todo tipo de|todos los servicios|soluciones integrales|servicio completo)\b",
];

const REGULATED_DOMAIN: &[&str] = &[
    r"\b(attorney|lawyer|law firm|legal)\b",
    r"\b(clinic|medical|dental|health ?care|therapy|doctor)\b",
    r"\b(insurance|mortgage|loan|lending|financial services|credit union|investment)\b",
    r"\b(university|college|school|academy|enrollment)\b",
    r"\babogad[oa]s?\b",
    r"\b(clinica|medic[oa]|salud|terapia)\b",
    r"\b(seguros?|hipoteca|prestamos?|financier[oa])\b",
    r"\b(universidad|escuela|colegio|academia|inscripcion)\b",
];

/// Built-in sources for one category.
///
/// `QualificationExpanded` is the core qualification list followed by
/// financing and eligibility phrasing.
pub fn builtin_sources(category: PatternCategory) -> Vec<&'static str> {
    match category {
        PatternCategory::Immediacy => IMMEDIACY.to_vec(),
        PatternCategory::Qualification => QUALIFICATION.to_vec(),
        PatternCategory::QualificationExpanded => QUALIFICATION
            .iter()
            .chain(QUALIFICATION_EXTRA.iter())
            .copied()
            .collect(),
        PatternCategory::ConsultBooking => CONSULT_BOOKING.to_vec(),
        PatternCategory::Followup => FOLLOWUP.to_vec(),
        PatternCategory::Multistep => MULTISTEP.to_vec(),
        PatternCategory::PriceDiscount => PRICE_DISCOUNT.to_vec(),
        PatternCategory::AdvisorLanguage => ADVISOR_LANGUAGE.to_vec(),
        PatternCategory::ServiceBreadth => SERVICE_BREADTH.to_vec(),
        PatternCategory::RegulatedDomain => REGULATED_DOMAIN.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_sources() {
        for category in PatternCategory::ALL {
            assert!(
                !builtin_sources(category).is_empty(),
                "{} has no sources",
                category
            );
        }
    }

    #[test]
    fn expanded_qualification_is_superset() {
        let core = builtin_sources(PatternCategory::Qualification);
        let expanded = builtin_sources(PatternCategory::QualificationExpanded);
        assert!(expanded.len() > core.len());
        assert!(core.iter().all(|source| expanded.contains(source)));
    }

    #[test]
    fn sources_are_written_in_normalized_form() {
        for category in PatternCategory::ALL {
            for source in builtin_sources(category) {
                assert!(source.is_ascii(), "{} source not ascii: {}", category, source);
            }
        }
    }
}
