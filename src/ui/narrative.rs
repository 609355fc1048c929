use eframe::egui::Ui;

// ---------------------------------------------------------------------------
// Static prose around the charts
// ---------------------------------------------------------------------------

pub const TITLE: &str = "💻 Remote Worker Analysis";

const AUTHOR: &str = "Created by Intan Nur Robi Annisa – student of Data Science and Data \
Analyst Bootcamp at Dibimbing.";
const PROFILE_URL: &str = "https://www.linkedin.com/in/intannurrobiannisa";

const PREVIEW: &str = "The productivity level of remote workers in a company is mostly at a \
medium level, with an average late task ratio of nearly 20%. To improve overall performance and \
efficiency, the company needs to increase productivity levels.\n\
Therefore, this project aims to analyze the work behavior and demographics of its remote workers \
in order to improve productivity levels.";

const SUMMARY: &str = "From 1000 remote workers, they are spread relatively evenly across \
demographic groups, showing that remote work spans various backgrounds and is not limited to \
specific industries, age groups, or regions. The number of workers from cities, towns, and \
villages shows nearly equal representation. Industry sectors such as Education, IT, and Retail \
contribute similar worker counts, while Healthcare and Finance have slightly smaller numbers. Age \
and experience distributions are broad yet balanced, with noticeable peaks around age 42 and 17 \
years of experience, indicating a mature and seasoned workforce at the core of the dataset.";

const FINDINGS: &str = "Individual work habits, especially effective scheduling, focused time, \
and on-time task completion, are the strongest predictors of productivity, far outweighing \
demographic factors like location or tool frequency.\n\
Then, A/B testing was used in the case implementation to compare productivity scores between \
workers who use AI-assisted planning tools and those who frequently use calendar scheduling \
tools. The productivity scores for users of AI-assisted planning vs. high calendar usage (top \
25%) are not the same, where calendar scheduling users clearly outperform AI planning users in \
productivity score, both by mean (+9.2 points) and median (+8.8 points).";

const CLOSING: &str = "Higher values are associated with higher productivity.";

pub fn header(ui: &mut Ui) {
    ui.heading(TITLE);
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.label(AUTHOR);
        ui.hyperlink_to("LinkedIn Profile", PROFILE_URL);
    });
    ui.add_space(8.0);

    ui.strong("Preview");
    ui.label(PREVIEW);
    ui.add_space(8.0);

    ui.strong("Overall Summary");
    ui.label(SUMMARY);
}

pub fn findings(ui: &mut Ui) {
    ui.strong("Findings");
    ui.label(FINDINGS);
}

pub fn closing(ui: &mut Ui) {
    ui.label(CLOSING);
}
