//! Text shown by each storyboard. Defaults reproduce the rice tasting campaign.

/// All strings of both storyboards.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoryCopy {
    pub showcase: ShowcaseCopy,
    pub tasting: TastingCopy,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShowcaseCopy {
    pub reveal_title: String,
    pub reveal_subtitle: String,
    pub details_heading: String,
    pub details_day: String,
    pub details_date: String,
    pub details_hours: String,
    pub highlight_caption: String,
    pub highlight_currency: String,
    pub highlight_price: String,
    pub highlight_unit: String,
    pub cta_intro: String,
    pub cta_title: String,
    pub cta_title_2: String,
    pub cta_brand: String,
    pub cta_when: String,
}

impl Default for ShowcaseCopy {
    fn default() -> Self {
        Self {
            reveal_title: "DEGUSTAÇÃO GRATUITA".into(),
            reveal_subtitle: "Arroz Integral Bem Casado".into(),
            details_heading: "VENHA NOS VISITAR".into(),
            details_day: "SÁBADO".into(),
            details_date: "06 de Dezembro".into(),
            details_hours: "7h às 13h".into(),
            highlight_caption: "PREÇO ESPECIAL".into(),
            highlight_currency: "R$".into(),
            highlight_price: "23,00".into(),
            highlight_unit: "fardo 10kg".into(),
            cta_intro: "Experimente".into(),
            cta_title: "ARROZ".into(),
            cta_title_2: "INTEGRAL".into(),
            cta_brand: "Bem Casado Alimentos".into(),
            cta_when: "Sábado • 7h-13h".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TastingCopy {
    pub headline: String,
    pub headline_2: String,
    pub product: String,
    pub date: String,
    pub hours: String,
    pub price: String,
    pub call: String,
}

impl Default for TastingCopy {
    fn default() -> Self {
        Self {
            headline: "DEGUSTAÇÃO".into(),
            headline_2: "GRATUITA!".into(),
            product: "Arroz Integral".into(),
            date: "SÁBADO, 06/12".into(),
            hours: "7h às 13h".into(),
            price: "R$ 23,00".into(),
            call: "Venha nos visitar!".into(),
        }
    }
}
