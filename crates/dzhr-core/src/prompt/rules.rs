//! Instruction text that appears in every composed prompt.
//!
//! Kept as data so each rule can be asserted on individually and so the
//! same priorities can be echoed at the start and end of an exchange.

/// Full accessibility rules for the system instruction.
pub const ACCESSIBILITY_RULES: &[&str] = &[
    "Color contrast: normal text must reach a contrast ratio of at least 4.5:1 against its background; large text (24px, or 18.66px bold) and the boundaries of UI controls must reach at least 3:1.",
    "Heading hierarchy: use exactly one <h1>, and never skip heading levels (an <h3> must follow an <h2>, never an <h1>).",
    "Semantic landmarks: structure the page with <header>, <nav>, <main> and <footer>, using <section>, <article> and <aside> where they carry meaning. A structure made only of <div> elements is not acceptable.",
    "Labels: every <input>, <select> and <textarea> has an associated <label for=\"...\"> or an aria-label; related controls are grouped in a <fieldset> with a <legend>.",
    "Focus visibility: every interactive element has a visible :focus-visible style (at least a 2px outline or equivalent ring). Never remove outlines without a replacement.",
    "Touch targets: every interactive element is at least 44x44px.",
    "Typography: body text is at least 16px and never below 14px anywhere; body copy uses a line-height of at least 1.5.",
    "Images carry meaningful alt text; purely decorative images use alt=\"\".",
    "Actions are <button> elements and navigation uses <a href>; never attach click behavior to non-interactive elements.",
    "Color is never the only means of conveying information (pair it with text, icons or patterns).",
];

/// Short form of the accessibility rules echoed in the user checklist.
pub const ACCESSIBILITY_CHECKLIST: &[&str] = &[
    "Text contrast is at least 4.5:1 (3:1 for large text and control boundaries)",
    "One <h1> and no skipped heading levels",
    "Semantic landmarks (<header>, <nav>, <main>, <footer>) are present",
    "Every form control has an associated label",
    "Every interactive element has a visible :focus-visible style",
    "Touch targets are at least 44x44px",
    "Body text is at least 16px with line-height of at least 1.5",
];

/// Rules attached to the design-system reference block.
pub const DESIGN_SYSTEM_RULES: &[&str] = &[
    "Reproduce the documented component anatomy: structure, spacing, corner radius, elevation and states (hover, focus, active, disabled).",
    "Use the system's naming for colors, type styles and components when declaring CSS custom properties and class names.",
    "Follow the system's typography scale and spacing scale instead of ad-hoc values.",
    "Where the system is silent, extrapolate from its existing patterns rather than introducing a new visual language.",
];

/// Mental design process for a fresh composition.
pub const CREATE_PROCESS: &[&str] = &[
    "Identify the primary user goal of this screen and its single most important action.",
    "Establish the content hierarchy and map it onto semantic landmarks with a single <h1>.",
    "Choose the layout primitive for each region: CSS Grid for two-dimensional layout, Flexbox for one-dimensional alignment.",
    "Apply the palette and typography, verifying every text and background pairing for contrast.",
    "Size interactive elements for touch and pointer input and give each one a :focus-visible state.",
    "Review the result against the checklist below before responding.",
];

/// Mental process for a targeted modification of an existing design.
pub const REFINE_PROCESS: &[&str] = &[
    "Read the current design and identify exactly which elements the request affects.",
    "Plan the smallest change that fully satisfies the request.",
    "Apply the change while keeping all other markup, class names and declarations unchanged.",
    "Re-check the accessibility of every element you touched.",
    "Return the complete updated html and css, not a diff.",
];

/// Rules of the refinement framing.
pub const PRESERVATION_RULES: &[&str] = &[
    "Preserve what works: keep the existing structure, content, class names and styles unless the request requires changing them.",
    "Change only what is requested. Do not redesign, reorder or restyle unrelated regions.",
    "Do not introduce colors, font families, spacing values or components outside the original constraint set; when no constraints were supplied, stay within the values already present in the current design.",
    "Never return less than the current design: if a change is not possible, return the current html and css unchanged.",
];

/// Key names of the output contract.
pub const OUTPUT_KEYS: [&str; 2] = ["html", "css"];
