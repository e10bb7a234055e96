//! Template travel plan used by the mock provider
//!
//! Destination-specific text comes from plain substring checks on the
//! lowercased destination. Anything unmatched gets the generic wording.

use std::fmt::Write;

use crate::models::{Budget, TravelPlanRequest, TripType};

/// Days rendered individually before the itinerary collapses into a summary
const DETAILED_DAYS: u16 = 7;

/// Render the full Markdown plan for a trip
#[must_use]
pub fn render(request: &TravelPlanRequest) -> String {
    let origin = &request.origin;
    let destination = &request.destination;
    let days = request.days;
    let trip_type = request.trip_type;
    let budget = request.budget;
    let place = destination.to_lowercase();

    format!(
        "# 🌍 Plan de Viaje: {origin} ➡️ {destination}

> ✈️ {days} días | Tipo: {trip_type} | Presupuesto: {budget}

---

## 📋 Información Práctica

### ✅ Documentación
- **Pasaporte:** Vigente con mínimo 6 meses de validez
- **Visado:** {visa}
- **Seguros:** Recomendable seguro de viaje con cobertura médica

### 💉 Salud
- **Vacunas:** {vaccines}
- **Medicamentos:** Llevar medicamentos habituales
- **Agua:** {water}

### 💰 Moneda y Presupuesto
- **Moneda local:** {currency}
- **Cambio aproximado:** Consultar tipo de cambio actual
- **Presupuesto estimado:** {estimate}

---

## 🗓️ Itinerario Detallado

{itinerary}

---

## 🏨 Alojamientos Recomendados

{lodging}

---

## 🍽️ Gastronomía

{food}

---

## 🎯 Actividades Principales

{activities}

---

## 💡 Consejos Útiles

{tips}

---

## 📱 Información de Contacto

- **Emergencias locales:** {emergency}
- **Embajada española:** Consultar dirección local
- **Apps útiles:** Google Translate, Maps.me, TripAdvisor

---

*✨ Plan generado para optimizar tu experiencia de viaje {trip_type} con presupuesto {budget}*

**🤖 Generado por Claude (Mock Service) para testing - Viajeros AI**",
        visa = visa_info(&place),
        vaccines = vaccine_info(&place),
        water = water_info(&place),
        currency = currency(&place),
        estimate = budget_estimate(days, budget),
        itinerary = itinerary(days, destination, trip_type),
        lodging = lodging(budget, trip_type),
        food = food(trip_type),
        activities = activities(trip_type, days),
        tips = tips(trip_type),
        emergency = emergency_numbers(&place),
    )
}

fn mentions(place: &str, names: &[&str]) -> bool {
    names.iter().any(|name| place.contains(name))
}

fn visa_info(place: &str) -> &'static str {
    if mentions(place, &["japón", "japan"]) {
        "No necesario hasta 90 días para turismo"
    } else if mentions(place, &["usa", "estados unidos"]) {
        "ESTA requerido para estancias turísticas"
    } else if mentions(place, &["tailandia", "thailand"]) {
        "No necesario hasta 30 días"
    } else {
        "Verificar requisitos según destino específico"
    }
}

fn vaccine_info(place: &str) -> &'static str {
    if mentions(place, &["tailandia", "vietnam", "camboya"]) {
        "Hepatitis A/B, Tétanos, considerar Encefalitis Japonesa"
    } else if mentions(place, &["india", "bangladesh"]) {
        "Hepatitis A/B, Fiebre Tifoidea, considerar Encefalitis Japonesa"
    } else {
        "Hepatitis A/B, Tétanos actualizados"
    }
}

fn water_info(place: &str) -> &'static str {
    if mentions(place, &["tailandia", "india", "vietnam"]) {
        "Solo agua embotellada, evitar hielo"
    } else {
        "Preferible agua embotellada por precaución"
    }
}

fn currency(place: &str) -> &'static str {
    if mentions(place, &["japón", "japan"]) {
        "Yen japonés (JPY)"
    } else if mentions(place, &["tailandia", "thailand"]) {
        "Baht tailandés (THB)"
    } else if mentions(place, &["usa", "estados unidos"]) {
        "Dólar estadounidense (USD)"
    } else if mentions(place, &["vietnam"]) {
        "Dong vietnamita (VND)"
    } else if mentions(place, &["francia", "paris"]) {
        "Euro (EUR)"
    } else {
        "Consultar moneda local"
    }
}

fn emergency_numbers(place: &str) -> &'static str {
    if mentions(place, &["europa", "francia", "italia"]) {
        "112 (Emergencias generales)"
    } else if mentions(place, &["usa", "estados unidos"]) {
        "911 (Emergencias)"
    } else if mentions(place, &["japón", "japan"]) {
        "110 (Policía), 119 (Bomberos/Ambulancia)"
    } else {
        "Consultar números locales de emergencia"
    }
}

fn budget_estimate(days: u16, budget: Budget) -> String {
    let daily = budget.daily_euros();
    let total = daily * u32::from(days);
    format!("{daily}€/día aprox. - Total estimado: {total}€")
}

fn itinerary(days: u16, destination: &str, trip_type: TripType) -> String {
    let mut out = String::new();
    for day in 1..=days.min(DETAILED_DAYS) {
        let label = if day == 1 {
            " - Llegada"
        } else if day == days {
            " - Salida"
        } else {
            ""
        };
        let _ = write!(
            out,
            "### Día {day}{label}\n\n{}\n\n",
            day_activities(day, trip_type)
        );
    }

    if days > DETAILED_DAYS {
        let _ = write!(
            out,
            "### Días {}-{days}\n\nContinuar explorando {destination} siguiendo el patrón establecido. \
             Considerar excursiones de día completo y tiempo libre para actividades espontáneas.\n\n",
            DETAILED_DAYS + 1
        );
    }

    out
}

fn scripted_day(day: u16) -> Option<&'static str> {
    match day {
        1 => Some(
            "- **Mañana:** Llegada y check-in al alojamiento\n- **Tarde:** Paseo de orientación por el centro\n- **Noche:** Cena en restaurante local recomendado",
        ),
        2 => Some(
            "- **Mañana:** Visita a principales atracciones históricas\n- **Tarde:** Museo o centro cultural\n- **Noche:** Experiencia gastronómica local",
        ),
        3 => Some(
            "- **Mañana:** Mercado local y compras de souvenirs\n- **Tarde:** Parque o zona verde para relajarse\n- **Noche:** Actividad nocturna típica de la zona",
        ),
        _ => None,
    }
}

fn day_activities(day: u16, trip_type: TripType) -> &'static str {
    match trip_type {
        TripType::Adventure => {
            "- **Mañana:** Actividad de aventura (senderismo, deportes)\n- **Tarde:** Exploración de naturaleza\n- **Noche:** Descanso y planificación del siguiente día"
        }
        TripType::Family => scripted_day(day).unwrap_or(
            "- **Todo el día:** Actividades familiares adaptadas a niños\n- **Descansos:** Tiempo libre en el alojamiento",
        ),
        _ => scripted_day(day).unwrap_or(
            "- **Todo el día:** Exploración libre según intereses\n- **Flexibilidad:** Adaptarse a descubrimientos espontáneos",
        ),
    }
}

fn lodging(budget: Budget, trip_type: TripType) -> String {
    let mut text = match budget {
        Budget::Low => {
            "**Hostales y guesthouses** (15-30€/noche)\n- Habitaciones compartidas o privadas básicas\n- Ubicación céntrica\n- Desayuno incluido"
        }
        Budget::Medium => {
            "**Hoteles 3-4 estrellas** (50-100€/noche)\n- Habitaciones privadas con baño\n- Servicios básicos incluidos\n- Ubicación conveniente"
        }
        Budget::High => {
            "**Hoteles de lujo y resorts** (150-300€/noche)\n- Suites con servicios premium\n- Spa, piscina, restaurantes\n- Ubicaciones exclusivas"
        }
    }
    .to_string();

    if trip_type == TripType::Family {
        text.push_str(
            "\n\n**Consideraciones familiares:**\n- Habitaciones familiares o conectadas\n- Zona infantil o piscina\n- Servicios de niñera disponibles",
        );
    }
    text
}

fn food(trip_type: TripType) -> String {
    let advice = if trip_type == TripType::Family {
        "Llevar snacks para niños"
    } else {
        "Ser aventurero con nuevos sabores"
    };

    format!(
        "### 🥘 Platos Típicos
- **Especialidad 1:** Plato tradicional imperdible
- **Especialidad 2:** Postre o bebida típica local
- **Especialidad 3:** Street food recomendado

### 🍽️ Restaurantes Recomendados
- **Opción económica:** Mercado local con comida tradicional
- **Opción media:** Restaurante familiar con ambiente local
- **Opción premium:** Restaurante reconocido o con vista

### ⚠️ Consejos Alimentarios
- Probar la gastronomía local gradualmente
- Hidratarse constantemente
- {advice}"
    )
}

const BASE_ACTIVITIES: [&str; 5] = [
    "🏛️ **Sitios históricos y monumentos**",
    "🎨 **Museos y galerías de arte**",
    "🌳 **Parques y espacios naturales**",
    "🛍️ **Mercados y zonas comerciales**",
    "🎭 **Espectáculos y eventos culturales**",
];

fn trip_activities(trip_type: TripType) -> [&'static str; 3] {
    match trip_type {
        TripType::Family => [
            "🎢 **Parques temáticos**",
            "🐠 **Acuarios y zoológicos**",
            "🏖️ **Playas familiares**",
        ],
        TripType::Adventure => [
            "🏔️ **Senderismo y trekking**",
            "🚴 **Deportes extremos**",
            "🏕️ **Camping y naturaleza**",
        ],
        TripType::Cultural => [
            "📚 **Bibliotecas históricas**",
            "🎼 **Conciertos y ópera**",
            "🏛️ **Sitios UNESCO**",
        ],
        TripType::Gastronomic => [
            "👨‍🍳 **Clases de cocina**",
            "🍷 **Catas y degustaciones**",
            "🥘 **Food tours**",
        ],
        TripType::Luxury => [
            "💎 **Spas y wellness**",
            "🥂 **Experiencias VIP**",
            "🛥️ **Tours privados**",
        ],
        TripType::Backpacker => [
            "🎒 **Free walking tours**",
            "🏠 **Hostales con ambiente**",
            "🚌 **Transporte económico**",
        ],
    }
}

fn activities(trip_type: TripType, days: u16) -> String {
    let list: Vec<&str> = BASE_ACTIVITIES
        .iter()
        .copied()
        .chain(trip_activities(trip_type))
        .collect();
    format!(
        "{}\n\n**⏰ Tiempo recomendado:** {} días permiten disfrutar sin prisas",
        list.join("\n"),
        days.min(10)
    )
}

fn tips(trip_type: TripType) -> String {
    let gear = if trip_type == TripType::Adventure {
        "Equipo deportivo específico"
    } else {
        "Ropa para ocasiones especiales"
    };
    let pace = if trip_type == TripType::Family {
        "Planificar descansos frecuentes"
    } else {
        "Interactuar con locales para experiencias auténticas"
    };

    format!(
        "### 🎒 Equipaje
- Ropa cómoda y apropiada para el clima
- Calzado cómodo para caminar
- {gear}

### 📱 Tecnología
- Adaptador de corriente universal
- Power bank para el móvil
- App de traducción offline

### 💡 Consejos Generales
- Llegar con mente abierta y flexible
- Respetar costumbres y tradiciones locales
- {pace}
- Hacer copias de documentos importantes
- Informar itinerario a familiares

### 🚨 Seguridad
- Mantener documentos en lugar seguro
- No ostentar objetos de valor
- Conocer números de emergencia locales
- Confiar en el instinto ante situaciones dudosas"
    )
}
