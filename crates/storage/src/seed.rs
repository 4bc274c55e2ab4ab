//! Built-in datasets served by [`InMemoryRepository::seeded`](crate::repository::InMemoryRepository::seeded).

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, Utc};
use prep_core::model::{
    Difficulty, ExamOrigin, MockExamInfo, Note, NoteId, Question, QuestionError, QuestionId, QuestionSetKey,
    RawStudyBlock, RawStudyChapter, SavedQuestion, SavedQuestionId, Subject, TopicInfo,
    TopicLevel,
};

//
// ─── QUESTION SETS ─────────────────────────────────────────────────────────────
//

struct Q {
    id: &'static str,
    prompt: &'static str,
    options: [&'static str; 4],
    correct: usize,
    topic: &'static str,
    difficulty: Option<Difficulty>,
    explanation: Option<&'static str>,
}

fn build(set: &[Q]) -> Result<Vec<Question>, QuestionError> {
    set.iter()
        .map(|q| {
            let mut question = Question::new(
                QuestionId::from(q.id),
                q.prompt,
                q.options.iter().map(|o| (*o).to_owned()).collect(),
                q.correct,
            )?
            .with_topic(q.topic);
            if let Some(d) = q.difficulty {
                question = question.with_difficulty(d);
            }
            if let Some(e) = q.explanation {
                question = question.with_explanation(e);
            }
            Ok(question)
        })
        .collect()
}

const fn mock(
    id: &'static str,
    prompt: &'static str,
    options: [&'static str; 4],
    topic: &'static str,
) -> Q {
    Q {
        id,
        prompt,
        options,
        correct: 0,
        topic,
        difficulty: None,
        explanation: None,
    }
}

const fn practice(
    id: &'static str,
    prompt: &'static str,
    options: [&'static str; 4],
    topic: &'static str,
    difficulty: Difficulty,
    explanation: &'static str,
) -> Q {
    Q {
        id,
        prompt,
        options,
        correct: 0,
        topic,
        difficulty: Some(difficulty),
        explanation: Some(explanation),
    }
}

const MATH_2024: &[Q] = &[
    mock("math-2024-1", "What is the value of x in the equation 2x + 5 = 15?", ["5", "10", "7.5", "20"], "Algebra"),
    mock("math-2024-2", "What is the area of a circle with radius 5?", ["25π", "10π", "5π", "100π"], "Geometry"),
    mock("math-2024-3", "Solve for y: 3y - 7 = 8", ["5", "3", "7", "15"], "Algebra"),
    mock("math-2024-4", "What is the derivative of x²?", ["2x", "x", "2", "x³/3"], "Calculus"),
    mock("math-2024-5", "What is the value of sin(90°)?", ["1", "0", "0.5", "√2/2"], "Trigonometry"),
];

const MATH_2023: &[Q] = &[
    mock("math-2023-1", "What is 15% of 200?", ["30", "15", "20", "25"], "Arithmetic"),
    mock("math-2023-2", "Simplify: (2x³)(3x²)", ["6x⁵", "5x⁵", "6x⁶", "5x⁶"], "Algebra"),
];

const PHYSICS_MECHANICS_EXAM: &[Q] = &[
    mock("physics-mech-1", "What is the formula for force?", ["F = ma", "F = mv", "F = mg", "F = mgh"], "Newton's Laws"),
    mock("physics-mech-2", "What is the SI unit of force?", ["Newton", "Joule", "Watt", "Pascal"], "Units"),
];

const PHYSICS_ELECTRICITY_EXAM: &[Q] = &[mock(
    "physics-elec-1",
    "What is the formula for Ohm's Law?",
    ["V = IR", "I = VR", "R = IV", "P = IV"],
    "Circuits",
)];

const ALGEBRA: &[Q] = &[
    practice("math-alg-1", "Solve for x: 2x + 5 = 15", ["x = 5", "x = 10", "x = 7.5", "x = 20"], "Algebra", Difficulty::Easy,
        "Subtract 5 from both sides: 2x = 10. Then divide both sides by 2: x = 5."),
    practice("math-alg-2", "Factor the expression: x² - 4", ["(x - 2)(x + 2)", "(x - 4)(x + 1)", "(x - 2)²", "(x + 2)²"], "Algebra", Difficulty::Medium,
        "This is a difference of squares: a² - b² = (a - b)(a + b). So x² - 4 = (x - 2)(x + 2)."),
    practice("math-alg-3", "Solve the system of equations: y = 2x + 1 and y = -x + 4", ["(1, 3)", "(2, 5)", "(3, 7)", "(0, 4)"], "Algebra", Difficulty::Medium,
        "Set the equations equal: 2x + 1 = -x + 4. Solve for x: 3x = 3, x = 1. Then y = 2(1) + 1 = 3."),
    practice("math-alg-4", "Simplify the expression: (3x³y²)²", ["9x⁶y⁴", "6x⁵y⁴", "9x⁵y⁴", "6x⁶y⁴"], "Algebra", Difficulty::Hard,
        "Apply the power to each factor: (3)² = 9, (x³)² = x⁶, (y²)² = y⁴. So the result is 9x⁶y⁴."),
];

const TRIGONOMETRY: &[Q] = &[
    practice("math-trig-1", "What is the value of sin(90°)?", ["1", "0", "0.5", "√2/2"], "Trigonometry", Difficulty::Easy,
        "The sine of 90 degrees is 1."),
    practice("math-trig-2", "What is the value of cos(0°)?", ["1", "0", "0.5", "√2/2"], "Trigonometry", Difficulty::Easy,
        "The cosine of 0 degrees is 1."),
    practice("math-trig-3", "What is the Pythagorean identity?", ["sin²θ + cos²θ = 1", "sinθ + cosθ = 1", "tanθ = sinθ/cosθ", "1 + tan²θ = sec²θ"], "Trigonometry", Difficulty::Medium,
        "The fundamental Pythagorean identity is sin²θ + cos²θ = 1."),
    practice("math-trig-4", "What is the period of the sine function?", ["2π", "π", "π/2", "4π"], "Trigonometry", Difficulty::Medium,
        "The sine function has a period of 2π radians."),
    practice("math-trig-5", "What is the value of tan(45°)?", ["1", "0", "√3", "√3/3"], "Trigonometry", Difficulty::Easy,
        "The tangent of 45 degrees is 1."),
];

const GEOMETRY: &[Q] = &[
    practice("math-geo-1", "What is the area of a circle with radius 5?", ["25π", "10π", "5π", "100π"], "Geometry", Difficulty::Easy,
        "The area of a circle is πr². With r = 5, area = π(5)² = 25π."),
    practice("math-geo-2", "What is the Pythagorean theorem?", ["a² + b² = c²", "a + b = c", "a² - b² = c²", "a × b = c"], "Geometry", Difficulty::Easy,
        "The Pythagorean theorem states that in a right triangle, the square of the hypotenuse equals the sum of the squares of the other two sides."),
];

const CALCULUS: &[Q] = &[practice(
    "math-calc-1",
    "What is the derivative of x²?",
    ["2x", "x", "2", "x³/3"],
    "Calculus",
    Difficulty::Medium,
    "Using the power rule, the derivative of xⁿ is n*xⁿ⁻¹. So derivative of x² is 2x.",
)];

const MECHANICS: &[Q] = &[
    practice("physics-mech-1", "What is the formula for force?", ["F = ma", "F = mv", "F = mg", "F = mgh"], "Mechanics", Difficulty::Easy,
        "Newton's second law states that force equals mass times acceleration: F = ma."),
    practice("physics-mech-2", "What is the SI unit of force?", ["Newton", "Joule", "Watt", "Pascal"], "Mechanics", Difficulty::Easy,
        "The SI unit of force is the Newton, named after Isaac Newton."),
];

const ELECTRICITY: &[Q] = &[practice(
    "physics-elec-1",
    "What is the formula for Ohm's Law?",
    ["V = IR", "I = VR", "R = IV", "P = IV"],
    "Electricity",
    Difficulty::Medium,
    "Ohm's Law states that voltage equals current times resistance: V = IR.",
)];

/// Every built-in question set keyed by subject and year/topic.
///
/// Physics mock exams are keyed by topic name rather than year, matching the
/// shipped dataset.
///
/// # Errors
///
/// Returns `QuestionError` if a built-in question is malformed.
pub fn question_sets() -> Result<HashMap<QuestionSetKey, Vec<Question>>, QuestionError> {
    let sets: [(QuestionSetKey, &[Q]); 10] = [
        (QuestionSetKey::mock("mathematics", "2024"), MATH_2024),
        (QuestionSetKey::mock("mathematics", "2023"), MATH_2023),
        (QuestionSetKey::mock("physics", "mechanics"), PHYSICS_MECHANICS_EXAM),
        (QuestionSetKey::mock("physics", "electricity"), PHYSICS_ELECTRICITY_EXAM),
        (QuestionSetKey::practice("mathematics", "algebra"), ALGEBRA),
        (QuestionSetKey::practice("mathematics", "trigonometry"), TRIGONOMETRY),
        (QuestionSetKey::practice("mathematics", "geometry"), GEOMETRY),
        (QuestionSetKey::practice("mathematics", "calculus"), CALCULUS),
        (QuestionSetKey::practice("physics", "mechanics"), MECHANICS),
        (QuestionSetKey::practice("physics", "electricity"), ELECTRICITY),
    ];
    sets.into_iter()
        .map(|(key, set)| Ok((key, build(set)?)))
        .collect()
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

const LOCAL_YEARS: [(u16, &str); 5] = [
    (2024, "2016 E.C."),
    (2023, "2015 E.C."),
    (2022, "2014 E.C."),
    (2021, "2013 E.C."),
    (2020, "2012 E.C."),
];

/// Five mock exams, newest first. `best` holds `(attempts, best score)` per year.
fn mock_exams(questions: u32, duration_minutes: u32, best: [(u32, Option<u8>); 5]) -> Vec<MockExamInfo> {
    LOCAL_YEARS
        .iter()
        .zip(best)
        .enumerate()
        .map(|(i, ((year, local), (attempts, best_score)))| MockExamInfo {
            year: *year,
            local_year: (*local).to_owned(),
            questions,
            duration_minutes,
            difficulty: if i < 2 { Difficulty::Hard } else { Difficulty::Medium },
            attempts,
            best_score,
        })
        .collect()
}

fn topics(rows: &[(&str, &str, u32, u32, TopicLevel)]) -> Vec<TopicInfo> {
    rows.iter()
        .map(|(name, description, questions, completed, level)| TopicInfo {
            name: (*name).to_owned(),
            description: (*description).to_owned(),
            questions: *questions,
            completed: *completed,
            level: *level,
        })
        .collect()
}

fn subject(
    (slug, name): (&str, &str),
    (total_questions, completed_questions): (u32, u32),
    mock_exams: Vec<MockExamInfo>,
    topics: Vec<TopicInfo>,
) -> Subject {
    Subject {
        slug: slug.to_owned(),
        name: name.to_owned(),
        total_questions,
        completed_questions,
        mock_exams,
        topics,
    }
}

#[must_use]
pub fn subjects() -> Vec<Subject> {
    use TopicLevel::{Advanced, Beginner, Intermediate};

    vec![
        subject(
            ("mathematics", "Mathematics"),
            (500, 120),
            mock_exams(50, 120, [(0, None), (2, Some(85)), (1, Some(78)), (3, Some(92)), (1, Some(72))]),
            topics(&[
                ("Algebra", "Linear equations, quadratic equations, polynomials", 80, 45, Intermediate),
                ("Geometry", "Shapes, angles, area, volume calculations", 60, 30, Intermediate),
                ("Trigonometry", "Sin, cos, tan functions and applications", 50, 20, Advanced),
                ("Calculus", "Derivatives, integrals, limits", 70, 15, Advanced),
                ("Statistics", "Mean, median, mode, probability", 40, 25, Beginner),
            ]),
        ),
        subject(
            ("physics", "Physics"),
            (400, 80),
            mock_exams(50, 120, [(0, None), (1, Some(68)), (2, Some(75)), (0, None), (1, Some(82))]),
            topics(&[
                ("Mechanics", "Motion, forces, energy, momentum", 70, 25, Intermediate),
                ("Thermodynamics", "Heat, temperature, gas laws", 45, 15, Advanced),
                ("Electromagnetism", "Electric fields, magnetic fields, circuits", 65, 20, Advanced),
                ("Optics", "Light, reflection, refraction, lenses", 40, 18, Intermediate),
                ("Modern Physics", "Atomic structure, quantum mechanics", 35, 8, Advanced),
            ]),
        ),
        subject(
            ("chemistry", "Chemistry"),
            (350, 90),
            mock_exams(50, 120, [(0, None), (1, Some(73)), (2, Some(80)), (1, Some(65)), (0, None)]),
            topics(&[
                ("Organic Chemistry", "Carbon compounds, functional groups, reactions", 60, 30, Advanced),
                ("Inorganic Chemistry", "Elements, compounds, periodic table", 55, 25, Intermediate),
                ("Physical Chemistry", "Chemical bonding, thermochemistry, kinetics", 50, 20, Advanced),
                ("Analytical Chemistry", "Qualitative and quantitative analysis", 40, 10, Intermediate),
                ("Environmental Chemistry", "Pollution, green chemistry, sustainability", 30, 5, Beginner),
            ]),
        ),
        subject(
            ("biology", "Biology"),
            (400, 60),
            mock_exams(50, 120, [(0, None), (1, Some(70)), (0, None), (2, Some(88)), (1, Some(77))]),
            topics(&[
                ("Cell Biology", "Cell structure, organelles, cell division", 50, 20, Intermediate),
                ("Genetics", "DNA, RNA, inheritance, mutations", 45, 15, Advanced),
                ("Ecology", "Ecosystems, food chains, environmental interactions", 40, 18, Intermediate),
                ("Human Biology", "Body systems, physiology, health", 55, 25, Intermediate),
                ("Evolution", "Natural selection, species formation, phylogeny", 35, 8, Advanced),
            ]),
        ),
        subject(
            ("english", "English"),
            (300, 150),
            mock_exams(60, 90, [(0, None), (3, Some(95)), (2, Some(88)), (1, Some(82)), (2, Some(90))]),
            topics(&[
                ("Grammar", "Tenses, parts of speech, sentence structure", 80, 60, Intermediate),
                ("Reading Comprehension", "Text analysis, inference, main ideas", 70, 45, Advanced),
                ("Vocabulary", "Word meanings, synonyms, antonyms", 60, 40, Beginner),
                ("Writing Skills", "Essays, letter writing, composition", 40, 15, Advanced),
                ("Literature", "Poetry, prose, literary devices", 50, 20, Advanced),
            ]),
        ),
        subject(
            ("aptitude", "Aptitude"),
            (250, 45),
            mock_exams(40, 60, [(0, None), (1, Some(62)), (2, Some(75)), (0, None), (1, Some(68))]),
            topics(&[
                ("Logical Reasoning", "Patterns, sequences, logical deduction", 50, 20, Advanced),
                ("Quantitative Aptitude", "Number systems, arithmetic, percentages", 60, 25, Intermediate),
                ("Spatial Reasoning", "Visual patterns, 3D reasoning, shapes", 40, 10, Advanced),
                ("Verbal Reasoning", "Analogies, word relationships, coding", 45, 15, Intermediate),
                ("Data Interpretation", "Charts, graphs, tables, analysis", 35, 8, Advanced),
            ]),
        ),
    ]
}

//
// ─── STUDY MATERIAL ────────────────────────────────────────────────────────────
//

fn block(id: &str, kind: &str, title: &str, content: &str, metadata: &[(&str, &str)]) -> RawStudyBlock {
    RawStudyBlock {
        id: id.to_owned(),
        kind: kind.to_owned(),
        title: Some(title.to_owned()),
        content: content.to_owned(),
        metadata: metadata
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect::<BTreeMap<_, _>>(),
    }
}

fn chapter(id: &str, title: &str, description: &str, minutes: u32, blocks: Vec<RawStudyBlock>) -> RawStudyChapter {
    RawStudyChapter {
        id: id.to_owned(),
        title: title.to_owned(),
        description: description.to_owned(),
        estimated_minutes: minutes,
        blocks,
    }
}

const LINEAR_INTRO: &str = "# Linear Equations

A **linear equation** is an algebraic equation in which each term is either a constant or the product of a constant and a single variable.

## Definition
A linear equation in one variable x has the form:
`ax + b = 0`

## Key Properties
- The graph of a linear equation is always a straight line
- A linear equation has exactly one solution
- The highest power of the variable is 1";

const LINEAR_TABLE: &str = "| Equation | Type | Reason |
|----------|------|--------|
| 2x + 5 = 0 | Linear | Highest power of x is 1 |
| 3x - 7 = 2x + 1 | Linear | Can be simplified to linear form |
| x² + 2x = 0 | Non-Linear | Contains x² term |
| 5x + 3y = 10 | Linear (two variables) | Both variables have power 1 |
| 1/x + 2 = 0 | Non-Linear | Contains 1/x which is x⁻¹ |";

const LINEAR_STEPS: &str = "## Method: Isolation of Variable

1. Simplify both sides
2. Move variable terms to one side
3. Move constant terms to the other side
4. Divide by the coefficient

Solve: `3x + 7 = 2x - 5` gives `3x - 2x = -5 - 7`, so `x = -12`.";

const LINEAR_QUIZ: &str = r#"{"questions":[
{"question":"Solve: 2x + 5 = 15","options":["x = 5","x = 10","x = -5","x = 0"],"correct":0,"explanation":"2x + 5 = 15 → 2x = 10 → x = 5"},
{"question":"Which is a linear equation?","options":["x² + 2 = 0","3x + 7 = 0","1/x = 5","x³ - 1 = 0"],"correct":1,"explanation":"3x + 7 = 0 is linear because the highest power of x is 1"}
]}"#;

const LINEAR_FORMULAS: &str = "## Essential Linear Equation Formulas

### Standard Form
`ax + b = 0`, solution `x = -b/a` (where a ≠ 0)

### General Solution Process
`ax + b = cx + d` gives `x = (d - b)/(a - c)`";

const QUADRATIC_INTRO: &str = "# Quadratic Equations

A **quadratic equation** is a polynomial equation of degree 2.

## Standard Form
`ax² + bx + c = 0`

## Key Characteristics
- The graph is a parabola
- Can have 0, 1, or 2 real solutions";

const GEOMETRY_INTRO: &str = "# Basic Geometry

Geometry is the branch of mathematics concerned with **shapes, sizes, properties of figures**.

### Angle Types
- **Acute:** Less than 90°
- **Right:** Exactly 90°
- **Obtuse:** Between 90° and 180°
- **Straight:** Exactly 180°";

const GEOMETRY_QUIZ: &str = r#"{"questions":[
{"question":"How many degrees are in the angles of a triangle?","options":["90°","180°","270°","360°"],"correct":1,"explanation":"The sum of angles in any triangle is always 180°"},
{"question":"What type of angle measures exactly 90°?","options":["Acute","Right","Obtuse","Straight"],"correct":1,"explanation":"A right angle measures exactly 90°, forming a perfect corner"},
{"question":"How many sides does a pentagon have?","options":["4","5","6","8"],"correct":1,"explanation":"A pentagon has 5 sides (penta = five in Greek)"}
]}"#;

const MOTION_INTRO: &str = "# Motion in One Dimension

Motion is the change in position of an object with respect to time.

- **Displacement (s):** change in position, unit m
- **Velocity (v):** rate of change of displacement, unit m/s
- **Acceleration (a):** rate of change of velocity, unit m/s²";

const MOTION_QUIZ: &str = r#"{"questions":[
{"question":"A car moves 100m north, then 50m south. What is its displacement?","options":["150m","50m north","100m","50m south"],"correct":1,"explanation":"Displacement is the net change in position: 100m north - 50m south = 50m north"},
{"question":"If velocity is constant, what can we say about acceleration?","options":["It is positive","It is negative","It is zero","It varies"],"correct":2,"explanation":"When velocity is constant, there is no change in velocity, so acceleration = 0"},
{"question":"What is the SI unit of velocity?","options":["m/s²","m/s","m","km/h"],"correct":1,"explanation":"Velocity is measured in meters per second (m/s) in the SI system"}
]}"#;

const MOTION_FORMULAS: &str = "## Kinematic Equations (constant acceleration)
1. `v = v_0 + at`
2. `s = v_0t + ½at²`
3. `v² = v_0² + 2as`
4. `s = ½(v_0 + v)t`";

/// Raw study chapters keyed by `(subject, topic)`.
#[must_use]
pub fn study_material() -> Vec<((String, String), Vec<RawStudyChapter>)> {
    let algebra = vec![
        chapter(
            "linear-equations",
            "Linear Equations",
            "Understanding and solving linear equations in one variable",
            45,
            vec![
                block("intro", "text", "Introduction to Linear Equations", LINEAR_INTRO, &[]),
                block("examples-table", "table", "Examples of Linear vs Non-Linear Equations", LINEAR_TABLE, &[]),
                block("solving-steps", "text", "Steps to Solve Linear Equations", LINEAR_STEPS, &[]),
                block(
                    "examples-image",
                    "image",
                    "Linear Equation Examples",
                    "https://images.unsplash.com/photo-1581089778245-3ce67677f718?w=1080",
                    &[
                        ("alt", "Mathematical equations on a blackboard"),
                        ("caption", "Examples of linear equations written on a blackboard"),
                        ("clickUrl", "https://www.khanacademy.org/math/algebra/x2f8bb11595b61c86:linear-equations-slope"),
                    ],
                ),
                block(
                    "video-tutorial",
                    "video",
                    "Solving Linear Equations - Video Tutorial",
                    "dQw4w9WgXcQ",
                    &[
                        ("duration", "8:45"),
                        ("description", "Watch this comprehensive tutorial on solving linear equations step by step"),
                    ],
                ),
                block("practice-quiz", "quiz", "Quick Practice Quiz", LINEAR_QUIZ, &[]),
                block("key-formulas", "formula", "Key Formulas to Remember", LINEAR_FORMULAS, &[]),
            ],
        ),
        chapter(
            "quadratic-equations",
            "Quadratic Equations",
            "Understanding and solving quadratic equations using various methods",
            60,
            vec![block("quad-intro", "text", "Introduction to Quadratic Equations", QUADRATIC_INTRO, &[])],
        ),
        chapter(
            "geometry-basics",
            "Basic Geometry",
            "Fundamental concepts of shapes, angles, and spatial relationships",
            40,
            vec![
                block("geometry-intro", "text", "Introduction to Geometry", GEOMETRY_INTRO, &[]),
                block(
                    "geometry-shapes",
                    "image",
                    "Geometric Shapes and Figures",
                    "https://images.unsplash.com/photo-1545841729-10c1118027a1?w=1080",
                    &[
                        ("alt", "Colorful geometric shapes and mathematical figures"),
                        ("clickUrl", "https://www.geogebra.org/geometry"),
                    ],
                ),
                block("geometry-quiz", "quiz", "Geometry Basics Quiz", GEOMETRY_QUIZ, &[]),
            ],
        ),
    ];

    let mechanics = vec![chapter(
        "motion",
        "Motion in One Dimension",
        "Understanding displacement, velocity, and acceleration",
        50,
        vec![
            block("motion-intro", "text", "Basic Concepts of Motion", MOTION_INTRO, &[]),
            block(
                "motion-graph",
                "image",
                "Motion Graphs and Diagrams",
                "https://images.unsplash.com/photo-1673825495120-76de8651ff0c?w=1080",
                &[
                    ("alt", "Physics motion graphs and diagrams"),
                    ("caption", "Position vs Time and Velocity vs Time graphs"),
                    ("clickUrl", "https://phet.colorado.edu/en/simulation/moving-man"),
                ],
            ),
            block(
                "physics-video",
                "video",
                "Motion in Physics - Educational Video",
                "tIc6x8VlPn0",
                &[
                    ("duration", "12:35"),
                    ("description", "Comprehensive explanation of motion concepts with real-world examples"),
                ],
            ),
            block("motion-quiz", "quiz", "Motion Concepts Quiz", MOTION_QUIZ, &[]),
            block("motion-formulas", "formula", "Essential Motion Equations", MOTION_FORMULAS, &[]),
        ],
    )];

    vec![
        (("mathematics".to_owned(), "algebra".to_owned()), algebra),
        (("physics".to_owned(), "mechanics".to_owned()), mechanics),
    ]
}

//
// ─── NOTES ─────────────────────────────────────────────────────────────────────
//

fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map_or(DateTime::<Utc>::UNIX_EPOCH, |dt| dt.and_utc())
}

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| (*t).to_owned()).collect()
}

/// Sample notes, newest first.
#[must_use]
pub fn notes() -> Vec<Note> {
    vec![
        Note {
            id: NoteId::new(1),
            title: "Calculus Integration Techniques".into(),
            content: "Key integration techniques to remember:\n\n1. Integration by parts: ∫u dv = uv - ∫v du\n2. Substitution method\n3. Partial fractions\n4. Trigonometric substitution\n\nRemember to always check your answer by differentiating!".into(),
            subject: "Mathematics".into(),
            topic: Some("Calculus".into()),
            tags: tags(&["integration", "formulas", "important"]),
            created_at: day(2024, 1, 15),
            updated_at: day(2024, 1, 20),
        },
        Note {
            id: NoteId::new(2),
            title: "Physics - Newton's Laws Summary".into(),
            content: "Newton's Three Laws of Motion:\n\n1st Law (Inertia): An object at rest stays at rest unless acted upon by an external force.\n\n2nd Law: F = ma\n\n3rd Law: For every action, there is an equal and opposite reaction.".into(),
            subject: "Physics".into(),
            topic: Some("Mechanics".into()),
            tags: tags(&["fundamentals", "laws", "motion"]),
            created_at: day(2024, 1, 10),
            updated_at: day(2024, 1, 10),
        },
        Note {
            id: NoteId::new(3),
            title: "English Grammar - Tenses Review".into(),
            content: "Common tense mistakes to avoid:\n\n• Present Perfect vs Simple Past\n• Future tenses (will vs going to)\n• Past Perfect usage\n\nTip: Pay attention to time markers in sentences.".into(),
            subject: "English".into(),
            topic: Some("Grammar".into()),
            tags: tags(&["grammar", "tenses", "common-mistakes"]),
            created_at: day(2024, 1, 12),
            updated_at: day(2024, 1, 18),
        },
    ]
}

#[must_use]
pub fn saved_questions() -> Vec<SavedQuestion> {
    vec![
        SavedQuestion {
            id: SavedQuestionId::new(1),
            question: "What is the derivative of sin(x²)?".into(),
            options: tags(&["cos(x²)", "2x cos(x²)", "cos(2x)", "2x sin(x²)"]),
            correct_answer: 1,
            explanation: Some("Using the chain rule: d/dx[sin(x²)] = cos(x²) × 2x = 2x cos(x²)".into()),
            subject: "Mathematics".into(),
            topic: Some("Calculus".into()),
            difficulty: Some(Difficulty::Medium),
            tags: tags(&["chain-rule", "derivatives"]),
            saved_at: day(2024, 1, 16),
            origin: ExamOrigin::Practice,
        },
        SavedQuestion {
            id: SavedQuestionId::new(2),
            question: "Which of the following is a strong acid?".into(),
            options: tags(&["CH₃COOH", "HCl", "NH₃", "H₂O"]),
            correct_answer: 1,
            explanation: Some("HCl (Hydrochloric acid) is a strong acid that completely ionizes in water.".into()),
            subject: "Chemistry".into(),
            topic: Some("Acids and Bases".into()),
            difficulty: Some(Difficulty::Easy),
            tags: tags(&["acids", "ionization"]),
            saved_at: day(2024, 1, 14),
            origin: ExamOrigin::Mock { year: 2023 },
        },
    ]
}
