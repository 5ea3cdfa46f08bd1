//! Static VIS category catalogs, consumed read-only by the upload flow.
//!
//! Two ordered lists: the basic identity system (logo standards, color
//! systems, typography, graphic assets, textures) and the application
//! scenarios (stationery, digital, merch, signage).

use crate::gen::batch::GenerationTask;
use crate::gen::ratio::AspectRatio;

pub struct VisCategory {
    pub name: &'static str,
    pub prompt_suffix: &'static str,
    pub aspect_ratio: AspectRatio,
}

pub static BASIC_CATEGORIES: [VisCategory; 30] = [
    // Logo standards & layouts
    VisCategory { name: "Technical Grid", prompt_suffix: "technical logo grid construction, blueprint style, geometric analysis, construction lines, fibonacci spiral, engineering drawing, black and white", aspect_ratio: AspectRatio::Square },
    VisCategory { name: "Clear Space Guide", prompt_suffix: "logo safe zone diagram, exclusion area defined by \"x\" height, minimal technical guide, dimension lines, spacing rules", aspect_ratio: AspectRatio::Square },
    VisCategory { name: "Horizontal Lockup", prompt_suffix: "logo horizontal layout standard, text beside icon, clean presentation on white, official corporate usage", aspect_ratio: AspectRatio::SixteenNine },
    VisCategory { name: "Vertical Lockup", prompt_suffix: "logo vertical layout standard, icon above text, centered alignment, modern swiss typography", aspect_ratio: AspectRatio::ThreeFour },
    VisCategory { name: "Square Container", prompt_suffix: "logo centered in a square container, balanced white space, social media profile picture style", aspect_ratio: AspectRatio::Square },
    VisCategory { name: "Logo Symbol Only", prompt_suffix: "isolated brand mark symbol, large scale, favicon style, abstract icon focus, no text", aspect_ratio: AspectRatio::Square },
    VisCategory { name: "Wordmark Isolation", prompt_suffix: "logotype text isolated, typography focus, letterform analysis, no symbol, clean presentation", aspect_ratio: AspectRatio::SixteenNine },
    VisCategory { name: "Small Scale Test", prompt_suffix: "logo scalability test sheet, shown at 16px 32px 64px, legibility check, minimalist grid", aspect_ratio: AspectRatio::FourThree },
    VisCategory { name: "Mono Ink Version", prompt_suffix: "solid black logo on white paper, 100% black, high contrast stamp effect, professional print standard", aspect_ratio: AspectRatio::Square },
    VisCategory { name: "Reverse Negative", prompt_suffix: "solid white logo on deep black background, reverse contrast, dark mode aesthetic, high impact", aspect_ratio: AspectRatio::Square },
    // Color systems
    VisCategory { name: "Primary Palette", prompt_suffix: "brand primary color palette, large swatches, pantone codes, cmyk rgb values, minimalist layout, luxury feel", aspect_ratio: AspectRatio::FourThree },
    VisCategory { name: "Secondary Palette", prompt_suffix: "complementary secondary color palette, accent colors, harmonic color scheme, modern design swatches", aspect_ratio: AspectRatio::FourThree },
    VisCategory { name: "Semantic Colors", prompt_suffix: "functional color system for UI, success green, error red, warning amber, info blue, cohesive with brand", aspect_ratio: AspectRatio::SixteenNine },
    VisCategory { name: "Gradient System", prompt_suffix: "brand color gradient mesh, smooth transition, modern blur, mesh gradient background, vibrant", aspect_ratio: AspectRatio::SixteenNine },
    VisCategory { name: "Color Weighting", prompt_suffix: "visual weight infographic, 60-30-10 color rule diagram, brand color application guide", aspect_ratio: AspectRatio::Square },
    // Typography specimens
    VisCategory { name: "Primary Typeface", prompt_suffix: "primary brand font family specimen poster, \"Aa\" large glyph, full alphabet set, style matching the uploaded logo aesthetic", aspect_ratio: AspectRatio::ThreeFour },
    VisCategory { name: "Secondary Typeface", prompt_suffix: "secondary typeface specimen, body copy text block, legible serif or sans, matching the brand personality", aspect_ratio: AspectRatio::ThreeFour },
    VisCategory { name: "Type Pairing", prompt_suffix: "typography pairing guide, primary headline with secondary body text, hierarchy example, clean layout", aspect_ratio: AspectRatio::FourThree },
    VisCategory { name: "Typography Grid", prompt_suffix: "baseline grid diagram, vertical rhythm in typography, technical spacing guide, modern layout", aspect_ratio: AspectRatio::ThreeFour },
    VisCategory { name: "Letterform Detail", prompt_suffix: "macro shot of a single character from the logo font, ink bleed or digital precision, font character analysis", aspect_ratio: AspectRatio::Square },
    // Graphic assets & visual DNA
    VisCategory { name: "Geometric Pattern", prompt_suffix: "seamless brand pattern, repeating geometric shapes derived from logo DNA, wallpaper texture, wrapping paper", aspect_ratio: AspectRatio::Square },
    VisCategory { name: "Abstract Supergraphic", prompt_suffix: "large scale abstract supergraphics, cropped logo elements, dynamic background composition, wall art", aspect_ratio: AspectRatio::SixteenNine },
    VisCategory { name: "Fluid Brand Shapes", prompt_suffix: "organic abstract shapes for brand background, fluid design, cohesive color palette", aspect_ratio: AspectRatio::SixteenNine },
    VisCategory { name: "Iconography Set", prompt_suffix: "custom 12-icon UI set, consistent line weight, minimalist vector style, cohesive brand language", aspect_ratio: AspectRatio::FourThree },
    VisCategory { name: "Brand Illustration", prompt_suffix: "corporate illustration style guide, flat vector art, abstract conceptual scene, brand colors", aspect_ratio: AspectRatio::FourThree },
    // Digital & textural standards
    VisCategory { name: "Digital UI Kit", prompt_suffix: "modern UI design system, buttons, input fields, cards, brand colors applied, figma-style preview", aspect_ratio: AspectRatio::SixteenNine },
    VisCategory { name: "App Icon System", prompt_suffix: "app icon design guidelines, ios and android rounded square container, logo adaptation", aspect_ratio: AspectRatio::Square },
    VisCategory { name: "Material Texture", prompt_suffix: "logo embossed on premium textured paper, macro shot, tactile feel, luxury branding", aspect_ratio: AspectRatio::Square },
    VisCategory { name: "Metal Fabrication", prompt_suffix: "3D laser-cut metal logo signage, brushed steel texture, industrial architectural style", aspect_ratio: AspectRatio::SixteenNine },
    VisCategory { name: "Glass Etching", prompt_suffix: "logo etched on frosted glass, office divider context, soft lighting, professional", aspect_ratio: AspectRatio::FourThree },
];

pub static APPLICATION_CATEGORIES: [VisCategory; 16] = [
    // Corporate
    VisCategory { name: "Business Card", prompt_suffix: "high quality professional business card mockup, minimalist modern design, front and back", aspect_ratio: AspectRatio::SixteenNine },
    VisCategory { name: "Letterhead", prompt_suffix: "clean corporate letterhead and envelope mockup on a desk, elegant paper texture", aspect_ratio: AspectRatio::ThreeFour },
    VisCategory { name: "ID Badge", prompt_suffix: "corporate id badge lanyard mockup, professional look, hanging", aspect_ratio: AspectRatio::ThreeFour },
    VisCategory { name: "Notebook", prompt_suffix: "hardcover notebook mockup with logo embossed, black leather texture", aspect_ratio: AspectRatio::ThreeFour },
    VisCategory { name: "Presentation Slide", prompt_suffix: "powerpoint presentation slide deck mockup, clean layout, branded master slide", aspect_ratio: AspectRatio::SixteenNine },
    // Digital
    VisCategory { name: "Mobile App", prompt_suffix: "modern iphone mockups showing a login screen with logo, clean ui, clay render", aspect_ratio: AspectRatio::NineSixteen },
    VisCategory { name: "Landing Page", prompt_suffix: "macbook pro laptop mockup, displaying a clean corporate landing page with logo", aspect_ratio: AspectRatio::SixteenNine },
    VisCategory { name: "Social Media Feed", prompt_suffix: "instagram grid layout mockup, cohesive brand aesthetic, phone screen", aspect_ratio: AspectRatio::Square },
    // Merch
    VisCategory { name: "T-Shirt", prompt_suffix: "black cotton t-shirt mockup with logo on chest, realistic fabric, fashion shoot", aspect_ratio: AspectRatio::ThreeFour },
    VisCategory { name: "Tote Bag", prompt_suffix: "canvas tote bag mockup, eco-friendly vibe, screen printed logo", aspect_ratio: AspectRatio::ThreeFour },
    VisCategory { name: "Coffee Cup", prompt_suffix: "disposable paper coffee cup mockup, cafe setting, steam", aspect_ratio: AspectRatio::Square },
    VisCategory { name: "Packaging Box", prompt_suffix: "minimalist shipping box mockup, packaging tape with logo pattern", aspect_ratio: AspectRatio::FourThree },
    // Signage
    VisCategory { name: "Office Sign", prompt_suffix: "3D outdoor office signage mockup, modern glass building, day time", aspect_ratio: AspectRatio::FourThree },
    VisCategory { name: "Billboard", prompt_suffix: "large outdoor billboard mockup, city street context, high impact", aspect_ratio: AspectRatio::SixteenNine },
    VisCategory { name: "Vehicle Wrap", prompt_suffix: "delivery van wrap mockup, side view, clean branding, white van", aspect_ratio: AspectRatio::SixteenNine },
    VisCategory { name: "Storefront", prompt_suffix: "boutique storefront signage, backlit, evening lighting, glowing logo", aspect_ratio: AspectRatio::FourThree },
];

/// One task per basic category, standard variation.
pub fn basic_tasks() -> Vec<GenerationTask> {
    BASIC_CATEGORIES
        .iter()
        .map(|category| GenerationTask {
            category_name: category.name.to_string(),
            prompt: format!(
                "{}, high quality graphic design, professional execution",
                category.prompt_suffix
            ),
            variation_label: "Standard".to_string(),
            aspect_ratio: category.aspect_ratio,
        })
        .collect()
}

/// One task per application scenario.
pub fn application_tasks() -> Vec<GenerationTask> {
    APPLICATION_CATEGORIES
        .iter()
        .map(|category| GenerationTask {
            category_name: category.name.to_string(),
            prompt: format!(
                "A {}, branding visible, photorealistic mockup",
                category.prompt_suffix
            ),
            variation_label: "Application".to_string(),
            aspect_ratio: category.aspect_ratio,
        })
        .collect()
}
