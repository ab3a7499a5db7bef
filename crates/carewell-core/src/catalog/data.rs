//! The built-in routine catalog.
//!
//! All guides are constructed once and served as `&'static` references.
//! Content is fixed at build time; there is no runtime editing.

use once_cell::sync::Lazy;

use super::model::{
    CueKind, MassagePart, OrganKind, RoutineGuide, RoutineKey, Step, StretchTarget,
};

fn step(instruction: &str, duration_secs: u32) -> Step {
    Step {
        instruction: instruction.to_string(),
        duration_secs,
    }
}

fn strs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn organ_guide(
    organ: OrganKind,
    name: &str,
    description: &str,
    steps: Vec<Step>,
    benefits: &[&str],
) -> RoutineGuide {
    RoutineGuide {
        key: RoutineKey::OrganCare(organ),
        name: name.to_string(),
        description: description.to_string(),
        steps,
        benefits: strs(benefits),
        cue: CueKind::Audio,
    }
}

fn massage_guide(
    part: MassagePart,
    name: &str,
    description: &str,
    steps: Vec<Step>,
    benefits: &[&str],
) -> RoutineGuide {
    RoutineGuide {
        key: RoutineKey::Massage(part),
        name: name.to_string(),
        description: description.to_string(),
        steps,
        benefits: strs(benefits),
        cue: CueKind::Audio,
    }
}

fn stretch_guide(
    target: StretchTarget,
    name: &str,
    description: &str,
    steps: Vec<Step>,
    benefits: &[&str],
) -> RoutineGuide {
    RoutineGuide {
        key: RoutineKey::Stretch(target),
        name: name.to_string(),
        description: description.to_string(),
        steps,
        benefits: strs(benefits),
        cue: CueKind::Timer,
    }
}

pub(super) static CATALOG: Lazy<Vec<RoutineGuide>> = Lazy::new(|| {
    vec![
        // ------------------------------------------------------------------
        // Organ-care meditations (audio-cued)
        // ------------------------------------------------------------------
        organ_guide(
            OrganKind::Kidney,
            "Kidney care meditation",
            "A quiet meditation that brings warmth and attention to the lower back.",
            vec![
                step(
                    "Sit comfortably and place both palms on your lower back, just above the hips. \
                     Close your eyes and take three slow breaths.",
                    50,
                ),
                step(
                    "Feel the warmth of your hands reaching the kidneys. With every exhale, let the \
                     area soften.",
                    60,
                ),
                step(
                    "Gently rub your lower back up and down, imagining tension dissolving with each \
                     pass.",
                    60,
                ),
                step(
                    "Rest your hands and simply notice the warmth that remains. Breathe naturally.",
                    50,
                ),
            ],
            &["Eases lower-back tightness", "Supports a sense of deep rest"],
        ),
        organ_guide(
            OrganKind::Liver,
            "Liver care meditation",
            "Guided attention to the right side of the ribcage to release held tension.",
            vec![
                step(
                    "Place your right palm below the right ribs and your left hand on top. Settle \
                     into an easy posture.",
                    50,
                ),
                step(
                    "Breathe into your right side, letting the ribs expand under your hands.",
                    60,
                ),
                step(
                    "With light pressure, make small circles over the area while keeping the breath \
                     slow and even.",
                    60,
                ),
                step(
                    "Release the pressure, rest your hands, and thank your body for its quiet work.",
                    50,
                ),
            ],
            &["Releases tension around the ribs", "Encourages calm, even breathing"],
        ),
        organ_guide(
            OrganKind::Stomach,
            "Stomach care meditation",
            "Soothing attention for the upper abdomen, ideal after a stressful day.",
            vec![
                step(
                    "Rest both palms over your upper abdomen. Let your shoulders drop away from your \
                     ears.",
                    50,
                ),
                step(
                    "Follow the rise and fall of your belly for a few breaths without changing \
                     anything.",
                    55,
                ),
                step(
                    "Trace slow clockwise circles with your palms, matching the rhythm of your \
                     exhale.",
                    60,
                ),
                step(
                    "Let your hands rest still and notice any softness that has arrived.",
                    45,
                ),
            ],
            &["Settles a nervous stomach", "Invites a relaxed posture"],
        ),
        organ_guide(
            OrganKind::Pancreas,
            "Pancreas care meditation",
            "A gentle body-scan centered on the area behind the stomach.",
            vec![
                step(
                    "Sit tall and place your left palm just below the ribs on the left side, right \
                     hand resting on your lap.",
                    50,
                ),
                step(
                    "Imagine your breath traveling toward the spot beneath your hand, warming it \
                     from the inside.",
                    60,
                ),
                step(
                    "Sweep your palm slowly toward the center of your belly and back, three times.",
                    55,
                ),
                step(
                    "Finish with both hands stacked over your navel, breathing softly.",
                    45,
                ),
            ],
            &["Builds interoceptive awareness", "Pairs well with an evening wind-down"],
        ),
        organ_guide(
            OrganKind::Intestine,
            "Intestine care meditation",
            "Circular abdominal attention that supports digestion and calm.",
            vec![
                step(
                    "Lie down or sit back, and rest both palms on your lower belly.",
                    45,
                ),
                step(
                    "Make wide, slow clockwise circles around the navel, barely pressing.",
                    60,
                ),
                step(
                    "Pause at any spot that feels tight and breathe into it for a few cycles.",
                    60,
                ),
                step(
                    "Still your hands, feel the belly move with the breath, and let go of effort.",
                    50,
                ),
            ],
            &["Supports digestion", "Releases abdominal guarding"],
        ),
        // ------------------------------------------------------------------
        // Massage guides (audio-cued)
        // ------------------------------------------------------------------
        massage_guide(
            MassagePart::Neck,
            "Neck release",
            "Loosens a desk-stiffened neck with light pressure and steady breathing.",
            vec![
                step(
                    "Straighten your back and drop your shoulders. Cup the base of your skull with \
                     both hands and feel the weight of your head.",
                    30,
                ),
                step(
                    "Grip the left side of your neck with your right hand and stroke slowly from top \
                     to bottom. Keep breathing at a natural rhythm.",
                    45,
                ),
                step(
                    "Switch sides: with your left hand, knead the right side of the neck between \
                     thumb and fingers, staying within a painless range.",
                    45,
                ),
                step(
                    "With your fingertips, draw small circles up the back of the neck, then slowly \
                     tilt your head side to side to finish.",
                    40,
                ),
            ],
            &["Relieves neck stiffness", "Eases tension headaches"],
        ),
        massage_guide(
            MassagePart::Shoulder,
            "Shoulder-blade release",
            "Improves circulation around the shoulder blades and softens rounded shoulders.",
            vec![
                step(
                    "Grip the top of your left shoulder with your right hand. Press lightly in time \
                     with your breath while rolling the shoulder to warm the muscle.",
                    45,
                ),
                step(
                    "Repeat on the right shoulder with your left hand, noticing the shoulder blade \
                     glide as you move.",
                    45,
                ),
                step(
                    "Rest both hands on your shoulders and draw large slow circles with your elbows, \
                     forward and then backward.",
                    60,
                ),
                step(
                    "Clasp your hands behind your back, open the chest, and squeeze the shoulder \
                     blades together. Hold for fifteen seconds, then release.",
                    30,
                ),
            ],
            &["Frees the shoulder blades", "Counteracts rounded posture"],
        ),
        massage_guide(
            MassagePart::Back,
            "Lower-back refresh",
            "Unwinds the lower back and lightens legs heavy from sitting.",
            vec![
                step(
                    "Sit forward on your chair and place both hands on your waist. Press the muscles \
                     beside the spine with your thumbs, moving in circles.",
                    45,
                ),
                step(
                    "Make loose fists and tap rhythmically along the sides of your hips and lower \
                     back to wake up circulation.",
                    45,
                ),
                step(
                    "Lengthen your spine, fold your upper body forward, and stretch the whole back. \
                     Exhale and hold for twenty seconds.",
                    40,
                ),
                step(
                    "Wrap both hands around your hip bones, feel the warmth, and take three deep \
                     breaths.",
                    30,
                ),
            ],
            &["Eases lower-back heaviness", "Refreshes the whole back line"],
        ),
        massage_guide(
            MassagePart::Foot,
            "Foot refresh",
            "Careful work from calves to soles to relieve swelling and cold feet.",
            vec![
                step(
                    "Circle each ankle slowly, outward then inward, loosening the joint.",
                    40,
                ),
                step(
                    "Stroke each calf upward from ankle to knee with your palms, following the flow \
                     of blood and lymph.",
                    45,
                ),
                step(
                    "Press the whole sole with your thumbs, working the arch and heel at a pleasant \
                     strength.",
                    45,
                ),
                step(
                    "Squeeze and release each toe, then finish by cupping your feet and breathing \
                     slowly.",
                    40,
                ),
            ],
            &["Reduces swelling", "Warms cold feet"],
        ),
        massage_guide(
            MassagePart::FullBody,
            "Whole-body wind-down",
            "A head-to-toe self-massage sequence for the end of the day.",
            vec![
                step(
                    "Rub your palms together until warm, then sweep them over your face and scalp \
                     with light pressure.",
                    40,
                ),
                step(
                    "Knead each shoulder and upper arm, working down to the hands and giving each \
                     finger a gentle pull.",
                    60,
                ),
                step(
                    "Circle your palms over your chest and belly, then press along the sides of \
                     your lower back.",
                    60,
                ),
                step(
                    "Stroke down each thigh and calf, ending at the feet. Press the soles firmly.",
                    60,
                ),
                step(
                    "Lie back or sit quietly, scan your body from head to toe, and rest.",
                    40,
                ),
            ],
            &["Full-body relaxation", "Prepares the body for sleep"],
        ),
        // ------------------------------------------------------------------
        // Stretch routines (timer-cued)
        // ------------------------------------------------------------------
        stretch_guide(
            StretchTarget::ShoulderPain,
            "Shoulder-pain relief stretch",
            "For breaks between desk work: opens the chest and loosens the shoulder girdle.",
            vec![
                step(
                    "Clasp your hands behind your back and open your chest, drawing the shoulder \
                     blades together. Breathe deeply and hold for twenty seconds.",
                    20,
                ),
                step(
                    "Reach your left hand over your head and slowly tilt your head to the right. \
                     Hold for twenty seconds.",
                    20,
                ),
                step(
                    "Reach your right hand over your head and tilt your head to the left. Hold for \
                     twenty seconds.",
                    20,
                ),
            ],
            &["Relieves shoulder tension", "Can be done at your desk"],
        ),
        stretch_guide(
            StretchTarget::BackPain,
            "Back-pain relief stretch",
            "Seated stretches that loosen the lower back and glutes.",
            vec![
                step(
                    "Sit forward on your chair and rest your right ankle on your left knee. Fold \
                     slowly forward and feel the stretch in your glutes for thirty seconds.",
                    30,
                ),
                step(
                    "Switch legs: left ankle on right knee, fold forward again for thirty seconds.",
                    30,
                ),
                step(
                    "Raise one arm overhead and lean sideways, stretching the side body for twenty \
                     seconds each side.",
                    40,
                ),
            ],
            &["Eases lower-back pain", "No floor space needed"],
        ),
        stretch_guide(
            StretchTarget::EyeStrain,
            "Eye-strain reset",
            "Softens the muscles around the eyes after long screen sessions.",
            vec![
                step(
                    "With both thumbs, press gently into the hollow under the brow bone, circling \
                     slowly for fifteen seconds.",
                    15,
                ),
                step(
                    "Using index and middle fingers, massage along the bone around each eye from \
                     inner corner outward for thirty seconds.",
                    30,
                ),
                step(
                    "Hold a finger in front of your face and alternate focus between the fingertip \
                     and a distant point, five seconds each, three times.",
                    30,
                ),
            ],
            &["Relieves eye fatigue", "Resets focus for screen work"],
        ),
        stretch_guide(
            StretchTarget::FullBody,
            "Whole-body stretch",
            "A short standing sequence that wakes up the entire body.",
            vec![
                step(
                    "Stand tall, interlace your fingers, and reach overhead. Lengthen the whole \
                     body and hold for twenty seconds.",
                    20,
                ),
                step(
                    "With knees soft, roll down slowly toward your toes and hang, letting the spine \
                     lengthen for thirty seconds.",
                    30,
                ),
                step(
                    "Rise up, place hands on hips, and circle them slowly in both directions.",
                    20,
                ),
                step(
                    "Finish with a gentle backbend, hands supporting the lower back, breathing \
                     slowly for twenty seconds.",
                    20,
                ),
            ],
            &["Wakes up the whole body", "Good first routine of the morning"],
        ),
    ]
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CareType;
    use strum::IntoEnumIterator;

    #[test]
    fn every_routine_key_has_a_guide() {
        let keys: Vec<RoutineKey> = OrganKind::iter()
            .map(RoutineKey::OrganCare)
            .chain(MassagePart::iter().map(RoutineKey::Massage))
            .chain(StretchTarget::iter().map(RoutineKey::Stretch))
            .collect();

        for key in keys {
            assert!(
                CATALOG.iter().any(|g| g.key == key),
                "missing guide for {key}"
            );
        }
    }

    #[test]
    fn guides_are_well_formed() {
        for guide in CATALOG.iter() {
            assert!(!guide.steps.is_empty(), "{} has no steps", guide.name);
            assert!(guide.total_secs() > 0, "{} has zero duration", guide.name);
            assert!(
                guide.steps.iter().all(|s| s.duration_secs > 0),
                "{} has a zero-length step",
                guide.name
            );
        }
    }

    #[test]
    fn cue_kinds_follow_care_type() {
        for guide in CATALOG.iter() {
            match guide.key.care_type() {
                CareType::Stretch => assert_eq!(guide.cue, CueKind::Timer),
                _ => assert_eq!(guide.cue, CueKind::Audio),
            }
        }
    }

    #[test]
    fn neck_massage_matches_published_durations() {
        let guide = CATALOG
            .iter()
            .find(|g| g.key == RoutineKey::Massage(MassagePart::Neck))
            .unwrap();
        let durations: Vec<u32> = guide.steps.iter().map(|s| s.duration_secs).collect();
        assert_eq!(durations, vec![30, 45, 45, 40]);
        assert_eq!(guide.total_secs(), 160);
    }
}
