//! Static keyword tables. Declaration order matters: the extractor reports
//! matches in this order and the generator picks the first region/industry.

use crate::calendar::COLOMBIAN_RETAIL_EVENTS;

/// Which keyword list a topic came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopicCategory {
    Region,
    Industry,
    Event,
    Trend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionInsight {
    pub name: &'static str,
    pub department: &'static str,
    pub leading_industries: &'static [&'static str],
    pub insight: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndustryTrend {
    pub name: &'static str,
    pub trend: &'static str,
}

pub const REGIONS: &[RegionInsight] = &[
    RegionInsight {
        name: "Bogotá",
        department: "Cundinamarca",
        leading_industries: &["finanzas", "tecnología", "educación", "gastronomía"],
        insight: "el mercado más grande del país; la competencia por atención digital es alta y la segmentación por localidad marca la diferencia.",
    },
    RegionInsight {
        name: "Medellín",
        department: "Antioquia",
        leading_industries: &["moda", "tecnología", "turismo"],
        insight: "ecosistema de innovación fuerte y público receptivo a marcas locales con propósito.",
    },
    RegionInsight {
        name: "Cali",
        department: "Valle del Cauca",
        leading_industries: &["gastronomía", "entretenimiento", "salud"],
        insight: "audiencia joven y muy activa en redes; la cultura de la salsa y la feria de diciembre mueven el consumo.",
    },
    RegionInsight {
        name: "Barranquilla",
        department: "Atlántico",
        leading_industries: &["entretenimiento", "retail", "inmobiliario"],
        insight: "el Carnaval concentra la inversión publicitaria del primer trimestre y el comercio portuario impulsa el retail.",
    },
    RegionInsight {
        name: "Cartagena",
        department: "Bolívar",
        leading_industries: &["turismo", "gastronomía", "inmobiliario"],
        insight: "el turismo nacional e internacional define la temporada alta; los contenidos bilingües rinden mejor.",
    },
    RegionInsight {
        name: "Bucaramanga",
        department: "Santander",
        leading_industries: &["retail", "moda", "salud"],
        insight: "consumidor ahorrador y leal; las promociones por volumen y el voz a voz funcionan bien.",
    },
    RegionInsight {
        name: "Pereira",
        department: "Risaralda",
        leading_industries: &["retail", "turismo", "agroindustria"],
        insight: "centro comercial del Eje Cafetero con alta influencia de remesas en el consumo.",
    },
    RegionInsight {
        name: "Manizales",
        department: "Caldas",
        leading_industries: &["educación", "agroindustria", "turismo"],
        insight: "ciudad universitaria; la población estudiantil responde a campañas de temporada académica.",
    },
    RegionInsight {
        name: "Santa Marta",
        department: "Magdalena",
        leading_industries: &["turismo", "gastronomía"],
        insight: "demanda estacional marcada por vacaciones de mitad y fin de año.",
    },
    RegionInsight {
        name: "Cúcuta",
        department: "Norte de Santander",
        leading_industries: &["retail", "moda"],
        insight: "dinámica de frontera; el precio y la disponibilidad inmediata pesan más que la marca.",
    },
    RegionInsight {
        name: "Villavicencio",
        department: "Meta",
        leading_industries: &["agroindustria", "turismo"],
        insight: "puerta de los Llanos; el turismo de fin de semana desde Bogotá es un público clave.",
    },
    RegionInsight {
        name: "Pasto",
        department: "Nariño",
        leading_industries: &["agroindustria", "entretenimiento"],
        insight: "el Carnaval de Negros y Blancos en enero es la gran vitrina comercial del año.",
    },
];

pub const INDUSTRIES: &[IndustryTrend] = &[
    IndustryTrend {
        name: "tecnología",
        trend: "las demos en video corto y los casos de éxito locales generan más leads que los anuncios genéricos.",
    },
    IndustryTrend {
        name: "retail",
        trend: "el comercio conversacional por WhatsApp y las compras en vivo están creciendo frente al e-commerce tradicional.",
    },
    IndustryTrend {
        name: "moda",
        trend: "colecciones cápsula, moda sostenible y colaboraciones con creadores de contenido locales.",
    },
    IndustryTrend {
        name: "gastronomía",
        trend: "reseñas en TikTok, menús de temporada y alianzas con plataformas de domicilios.",
    },
    IndustryTrend {
        name: "turismo",
        trend: "experiencias locales auténticas y contenido generado por viajeros.",
    },
    IndustryTrend {
        name: "salud",
        trend: "contenido educativo de profesionales verificados y telemedicina.",
    },
    IndustryTrend {
        name: "educación",
        trend: "microcursos, certificaciones cortas y testimonios de egresados.",
    },
    IndustryTrend {
        name: "belleza",
        trend: "tutoriales cortos, productos naturales y pruebas virtuales con realidad aumentada.",
    },
    IndustryTrend {
        name: "inmobiliario",
        trend: "recorridos virtuales y financiación explicada en formatos simples.",
    },
    IndustryTrend {
        name: "finanzas",
        trend: "educación financiera en redes y productos digitales sin papeleo.",
    },
    IndustryTrend {
        name: "agroindustria",
        trend: "trazabilidad del origen y venta directa del productor al consumidor.",
    },
    IndustryTrend {
        name: "entretenimiento",
        trend: "eventos híbridos y comunidades alrededor de creadores.",
    },
];

pub const TRENDS: &[&str] = &[
    "inteligencia artificial",
    "TikTok",
    "Instagram",
    "WhatsApp",
    "influencers",
    "e-commerce",
    "video corto",
    "sostenibilidad",
    "marketing de contenidos",
    "realidad aumentada",
];

pub fn region_names() -> impl Iterator<Item = &'static str> {
    REGIONS.iter().map(|r| r.name)
}

pub fn industry_names() -> impl Iterator<Item = &'static str> {
    INDUSTRIES.iter().map(|i| i.name)
}

pub fn event_names() -> impl Iterator<Item = &'static str> {
    COLOMBIAN_RETAIL_EVENTS.iter().map(|e| e.name)
}

pub fn trend_names() -> impl Iterator<Item = &'static str> {
    TRENDS.iter().copied()
}

pub fn find_region(topic: &str) -> Option<&'static RegionInsight> {
    let key = topic.to_lowercase();
    REGIONS.iter().find(|r| r.name.to_lowercase() == key)
}

pub fn find_industry(topic: &str) -> Option<&'static IndustryTrend> {
    let key = topic.to_lowercase();
    INDUSTRIES.iter().find(|i| i.name.to_lowercase() == key)
}

/// The four keyword lists in matching order
pub fn keyword_lists() -> Vec<(TopicCategory, Vec<&'static str>)> {
    vec![
        (TopicCategory::Region, region_names().collect()),
        (TopicCategory::Industry, industry_names().collect()),
        (TopicCategory::Event, event_names().collect()),
        (TopicCategory::Trend, trend_names().collect()),
    ]
}
