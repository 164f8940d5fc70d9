//! Built-in SEO audit catalog.

use super::item::{Catalog, ChecklistItem, ChecklistSection};
use once_cell::sync::Lazy;

pub const LISTING_PAGE_SECTION: &str = "📋 Page Liste des Articles";
pub const ARTICLE_PAGE_SECTION: &str = "📄 Page Article Individuel";

static SHIPPED: Lazy<Catalog> = Lazy::new(|| {
    Catalog::new(vec![
        ChecklistSection::new(
            LISTING_PAGE_SECTION,
            vec![
                item(
                    "pla-1",
                    "URL propre et descriptive (/blog, /articles)",
                    8,
                    "Utiliser la fonction URL personnalisée de Framer",
                ),
                item(
                    "pla-2",
                    "Pagination avec query parameters (?page=1, ?page=2)",
                    9,
                    "Google recommande les query parameters",
                ),
                item(
                    "pla-3",
                    "Canonical auto-référentiel pour chaque page paginée",
                    10,
                    "Éviter le duplicate content",
                ),
                item(
                    "pla-4",
                    "Navigation numérotée claire (1, 2, 3... + Suivant/Précédent)",
                    8,
                    "Utiliser des balises <a href>",
                ),
                item(
                    "pla-5",
                    "Éviter les fragment identifiers (#) pour pagination",
                    9,
                    "Google ignore les fragments",
                ),
                item(
                    "pla-6",
                    "Title tag optimisé (50-60 caractères)",
                    10,
                    "Utiliser variables CMS de Framer",
                ),
                item(
                    "pla-7",
                    "Title tag unique pour chaque page paginée",
                    9,
                    "Ajouter numéro de page",
                ),
                item(
                    "pla-8",
                    "Meta description attractive (150-160 caractères)",
                    8,
                    "Site Settings > SEO",
                ),
                item("pla-9", "Meta robots (index, follow)", 9, "Framer gère automatiquement"),
                item("pla-10", "Balises Open Graph", 7, "Page Settings > Social Media Preview"),
                item("pla-11", "H1 unique et descriptif", 10, "Text component avec style H1"),
                item("pla-12", "Contenu people-first", 10, "Core Update 2025 priorité"),
                item(
                    "pla-13",
                    "Aperçus d'articles avec extrait et auteur",
                    8,
                    "Card component avec CMS fields",
                ),
                item(
                    "pla-14",
                    "Images d'aperçu avec alt text",
                    8,
                    "Remplir Alt Text avec variable CMS",
                ),
                item("pla-15", "Breadcrumb navigation structuré", 7, "Avec Schema BreadcrumbList"),
                item("pla-16", "Core Web Vitals - LCP < 2.5s", 10, "Optimiser images avec Framer"),
                item("pla-17", "Core Web Vitals - INP < 200ms", 10, "INP remplace FID depuis 2024"),
                item("pla-18", "Core Web Vitals - CLS < 0.1", 10, "Définir dimensions fixes"),
                item(
                    "pla-19",
                    "Images optimisées WebP/AVIF",
                    8,
                    "Framer convertit automatiquement",
                ),
                item("pla-20", "Version mobile responsive", 10, "Utiliser breakpoints Framer"),
                item("pla-21", "Schema.org CollectionPage", 8, "JSON-LD via Custom Code"),
                item(
                    "pla-22",
                    "Liens internes vers pages importantes",
                    8,
                    "Link components vers piliers",
                ),
                item(
                    "pla-23",
                    "Liens contextuels vers articles connexes",
                    9,
                    "Topical authority 2025",
                ),
            ],
        ),
        ChecklistSection::new(
            ARTICLE_PAGE_SECTION,
            vec![
                item(
                    "pai-1",
                    "URL descriptive avec mot-clé (/blog/titre-article)",
                    10,
                    "Configurer slug field CMS",
                ),
                item("pai-2", "Structure d'URL cohérente", 9, "Utiliser /blog/[slug]"),
                item("pai-3", "Breadcrumb avec Schema", 8, "Accueil > Blog > Article"),
                item(
                    "pai-4",
                    "Title tag optimisé (50-60 car)",
                    10,
                    "Variables CMS: {title} | {siteName}",
                ),
                item("pai-5", "Meta description unique", 9, "Utiliser {excerpt}"),
                item("pai-6", "E-E-A-T: Experience réelle", 10, "Cas pratiques, exemples vécus"),
                item("pai-7", "E-E-A-T: Expertise démontrée", 10, "Citer sources et études"),
                item("pai-8", "E-E-A-T: Authority (backlinks)", 9, "Contenu linkable"),
                item("pai-9", "E-E-A-T: Trust et transparence", 10, "Plus important des E-E-A-T"),
                item("pai-10", "H1 unique avec mot-clé", 10, "Un seul H1 par page"),
                item("pai-11", "Structure headings logique", 9, "H1 > H2 > H3"),
                item("pai-12", "Contenu people-first (1500+ mots)", 10, "Articles approfondis"),
                item("pai-13", "Date de publication visible", 8, "Date field CMS"),
                item("pai-14", "Date de modification", 9, "Freshness signal"),
                item("pai-15", "Auteur avec bio détaillée", 9, "Page auteur dédiée"),
                item("pai-16", "Credentials auteur visibles", 10, "Formation, certifications"),
                item("pai-17", "Images avec alt text optimisé", 9, "Alt text unique et descriptif"),
                item("pai-18", "Schema Article/BlogPosting", 9, "JSON-LD BlogPosting"),
                item("pai-19", "Schema Author détaillé", 8, "Person schema complet"),
                item("pai-20", "FAQ Schema si applicable", 8, "Pour AI Overviews"),
                item("pai-21", "Liens internes contextuels", 10, "3-5 liens minimum"),
                item("pai-22", "Liens externes autoritaires", 9, "Sources fiables E-E-A-T"),
                item("pai-23", "Articles suggérés pertinents", 8, "Section À lire aussi"),
                item("pai-24", "INP < 200ms toutes interactions", 10, "Mesure globale réactivité"),
                item("pai-25", "Optimisation AI Overviews", 9, "Questions spécifiques"),
                item("pai-26", "Citations vérifiables", 9, "Fact-checking crucial"),
            ],
        ),
    ])
    .expect("shipped catalog is valid")
});

/// Returns the catalog compiled into this binary.
///
/// Built on first access and shared for the process lifetime.
pub fn shipped_catalog() -> &'static Catalog {
    &SHIPPED
}

fn item(id: &str, text: &str, importance: u8, note: &str) -> ChecklistItem {
    ChecklistItem::new(id, text, importance).with_note(note)
}
