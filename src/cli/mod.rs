// src/cli/mod.rs
//
// Command line front end. Each subcommand maps onto one application
// command and prints its DTO as JSON.

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use jobportal::application::commands::{self, JobSearch};
use jobportal::application::{
    AdminFormDto, ApplyDto, CandidateFormDto, CompanyFormDto, ErrorResponse, JobFormDto,
};
use jobportal::domain::Role;
use jobportal::AppState;

#[derive(Parser)]
#[command(name = "jobportal")]
#[command(about = "Apply for jobs, review applicants and follow the portal from a terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Log in and keep the session for later commands
    Login {
        email: String,
        #[arg(long)]
        password: String,
        /// Candidate, Company or Admin
        #[arg(long, default_value = "Candidate")]
        role: String,
    },
    /// Create a company or candidate account
    #[command(subcommand)]
    Signup(SignupCommand),
    /// End the current session
    Logout,
    /// Show who is logged in
    Whoami,
    /// Dashboard for the logged-in role
    Home,
    /// Browse and search jobs (candidates)
    #[command(subcommand)]
    Jobs(JobsCommand),
    /// Apply for a job
    Apply {
        job_id: String,
        #[arg(long)]
        qualification: String,
        #[arg(long)]
        resume_link: String,
    },
    /// Your applications, newest first
    Applications {
        #[arg(long, default_value = "")]
        status: String,
    },
    /// Offers waiting for an answer
    Offers,
    /// Withdraw one of your applications
    Withdraw { application_id: String },
    /// Accept an offer
    Accept { application_id: String },
    /// Edit your candidate profile
    Profile(CandidateArgs),
    /// Manage your company's jobs and applicants
    #[command(subcommand)]
    Company(CompanyCommand),
    /// Platform administration
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Subcommand)]
pub enum JobsCommand {
    /// Every job, optionally narrowed by location
    Browse {
        #[arg(long, default_value = "")]
        location: String,
    },
    /// Search by position title or skill
    Search {
        term: String,
        #[arg(long, value_enum, default_value_t = SearchBy::Position)]
        by: SearchBy,
        #[arg(long, default_value = "")]
        location: String,
    },
    /// One job, with your application for it
    Show { job_id: String },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SearchBy {
    Position,
    Skill,
}

impl From<SearchBy> for JobSearch {
    fn from(by: SearchBy) -> Self {
        match by {
            SearchBy::Position => JobSearch::Position,
            SearchBy::Skill => JobSearch::Skill,
        }
    }
}

#[derive(Args)]
pub struct JobArgs {
    #[arg(long)]
    pub position: String,
    #[arg(long)]
    pub location: String,
    #[arg(long)]
    pub experience: String,
    #[arg(long)]
    pub description: String,
    /// Comma separated
    #[arg(long, default_value = "")]
    pub skills: String,
    /// Full-time, Part-time, Contract or Internship
    #[arg(long)]
    pub job_type: String,
}

impl From<JobArgs> for JobFormDto {
    fn from(args: JobArgs) -> Self {
        Self {
            position: args.position,
            location: args.location,
            experience: args.experience,
            description: args.description,
            skills: args.skills,
            job_type: args.job_type,
        }
    }
}

#[derive(Args)]
pub struct CompanyArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    /// Leave out when editing to keep the current password
    #[arg(long, default_value = "")]
    pub password: String,
    #[arg(long)]
    pub location: String,
    #[arg(long, default_value = "")]
    pub description: String,
}

impl From<CompanyArgs> for CompanyFormDto {
    fn from(args: CompanyArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            password: args.password,
            location: args.location,
            description: args.description,
        }
    }
}

#[derive(Args)]
pub struct CandidateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    /// Leave out when editing to keep the current password
    #[arg(long, default_value = "")]
    pub password: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    #[arg(long, default_value = "")]
    pub resume_link: String,
    /// Comma separated
    #[arg(long, default_value = "")]
    pub skills: String,
}

impl From<CandidateArgs> for CandidateFormDto {
    fn from(args: CandidateArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            password: args.password,
            phone: args.phone,
            resume_link: args.resume_link,
            skills: args.skills,
        }
    }
}

#[derive(Subcommand)]
pub enum SignupCommand {
    Company(CompanyArgs),
    Candidate(CandidateArgs),
}

#[derive(Subcommand)]
pub enum CompanyCommand {
    /// Edit your company profile
    Profile(CompanyArgs),
    /// Jobs you posted
    Jobs,
    Post(JobArgs),
    Update {
        job_id: String,
        #[command(flatten)]
        job: JobArgs,
    },
    Delete { job_id: String },
    /// Applications to one of your jobs
    Applications {
        job_id: String,
        #[arg(long, default_value = "")]
        status: String,
    },
    /// Move an application to Interviewing, Offered or Rejected
    SetStatus {
        application_id: String,
        status: String,
    },
}

#[derive(Subcommand)]
pub enum AdminCommand {
    Applications {
        #[arg(long, default_value = "")]
        status: String,
    },
    DeleteApplication { application_id: String },
    DeleteJob { job_id: String },
    DeleteCandidate { candidate_id: String },
    DeleteCompany { company_id: String },
    /// Create another admin account
    AddAdmin {
        email: String,
        #[arg(long)]
        password: String,
    },
    Analytics,
    Companies,
    Candidates,
}

fn print<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints a listing unless a newer fetch replaced it
fn print_latest<T: Serialize>(value: Option<T>) -> Result<()> {
    match value {
        Some(value) => print(&value),
        None => {
            log::debug!("listing superseded by a newer fetch");
            Ok(())
        }
    }
}

fn hint(error: &ErrorResponse) {
    if error.requires_login() {
        eprintln!("run `jobportal login` to start a new session");
    }
}

fn dismiss(error: ErrorResponse) -> anyhow::Error {
    hint(&error);
    error.into()
}

pub async fn run(cli: Cli, state: &AppState) -> Result<()> {
    match cli.command {
        Command::Login {
            email,
            password,
            role,
        } => print(
            &commands::login(state, &email, &password, &role)
                .await
                .map_err(dismiss)?,
        ),
        Command::Signup(SignupCommand::Company(company)) => print(
            &commands::signup_company(state, company.into())
                .await
                .map_err(dismiss)?,
        ),
        Command::Signup(SignupCommand::Candidate(candidate)) => print(
            &commands::signup_candidate(state, candidate.into())
                .await
                .map_err(dismiss)?,
        ),
        Command::Logout => {
            commands::logout(state).map_err(dismiss)?;
            println!("logged out");
            Ok(())
        }
        Command::Whoami => match commands::current_session(state) {
            Some(session) => print(&session),
            None => {
                println!("not logged in");
                Ok(())
            }
        },
        Command::Home => home(state).await,
        Command::Jobs(jobs) => run_jobs(jobs, state).await,
        Command::Apply {
            job_id,
            qualification,
            resume_link,
        } => {
            let form = ApplyDto {
                job_id,
                qualification,
                resume_link,
            };
            print(&commands::apply(state, form).await.map_err(dismiss)?)
        }
        Command::Applications { status } => print_latest(
            commands::my_applications(state, &status)
                .await
                .map_err(dismiss)?,
        ),
        Command::Offers => print(&commands::pending_offers(state).await.map_err(dismiss)?),
        Command::Withdraw { application_id } => {
            transition(commands::withdraw(state, &application_id).await)
        }
        Command::Accept { application_id } => {
            transition(commands::accept_offer(state, &application_id).await)
        }
        Command::Profile(candidate) => print(
            &commands::update_candidate_profile(state, candidate.into())
                .await
                .map_err(dismiss)?,
        ),
        Command::Company(company) => run_company(company, state).await,
        Command::Admin(admin) => run_admin(admin, state).await,
    }
}

async fn home(state: &AppState) -> Result<()> {
    let Some(session) = commands::current_session(state) else {
        println!("not logged in");
        return Ok(());
    };
    match session.role.parse::<Role>()? {
        Role::Candidate => print(&commands::candidate_home(state).await.map_err(dismiss)?),
        Role::Company => print(&commands::company_home(state).await.map_err(dismiss)?),
        Role::Admin => print(&commands::analytics(state).await.map_err(dismiss)?),
    }
}

async fn run_jobs(command: JobsCommand, state: &AppState) -> Result<()> {
    match command {
        JobsCommand::Browse { location } => print_latest(
            commands::browse_jobs(state, &location)
                .await
                .map_err(dismiss)?,
        ),
        JobsCommand::Search { term, by, location } => print_latest(
            commands::search_jobs(state, by.into(), &term, &location)
                .await
                .map_err(dismiss)?,
        ),
        JobsCommand::Show { job_id } => print(
            &commands::job_detail(state, &job_id)
                .await
                .map_err(dismiss)?,
        ),
    }
}

async fn run_company(command: CompanyCommand, state: &AppState) -> Result<()> {
    match command {
        CompanyCommand::Profile(company) => print(
            &commands::update_company_profile(state, company.into())
                .await
                .map_err(dismiss)?,
        ),
        CompanyCommand::Jobs => print(&commands::company_jobs(state).await.map_err(dismiss)?),
        CompanyCommand::Post(job) => print(
            &commands::post_job(state, job.into())
                .await
                .map_err(dismiss)?,
        ),
        CompanyCommand::Update { job_id, job } => print(
            &commands::update_job(state, &job_id, job.into())
                .await
                .map_err(dismiss)?,
        ),
        CompanyCommand::Delete { job_id } => {
            commands::delete_job(state, &job_id)
                .await
                .map_err(dismiss)?;
            println!("deleted job {}", job_id);
            Ok(())
        }
        CompanyCommand::Applications { job_id, status } => print_latest(
            commands::job_applications(state, &job_id, &status)
                .await
                .map_err(dismiss)?,
        ),
        CompanyCommand::SetStatus {
            application_id,
            status,
        } => transition(commands::set_application_status(state, &application_id, &status).await),
    }
}

async fn run_admin(command: AdminCommand, state: &AppState) -> Result<()> {
    match command {
        AdminCommand::Applications { status } => print_latest(
            commands::all_applications(state, &status)
                .await
                .map_err(dismiss)?,
        ),
        AdminCommand::DeleteApplication { application_id } => {
            commands::remove_application(state, &application_id)
                .await
                .map_err(dismiss)?;
            println!("deleted application {}", application_id);
            Ok(())
        }
        AdminCommand::DeleteJob { job_id } => {
            commands::remove_job(state, &job_id)
                .await
                .map_err(dismiss)?;
            println!("deleted job {}", job_id);
            Ok(())
        }
        AdminCommand::DeleteCandidate { candidate_id } => {
            commands::delete_candidate(state, &candidate_id)
                .await
                .map_err(dismiss)?;
            println!("deleted candidate {}", candidate_id);
            Ok(())
        }
        AdminCommand::DeleteCompany { company_id } => {
            commands::delete_company(state, &company_id)
                .await
                .map_err(dismiss)?;
            println!("deleted company {}", company_id);
            Ok(())
        }
        AdminCommand::AddAdmin { email, password } => print(
            &commands::create_admin(state, AdminFormDto { email, password })
                .await
                .map_err(dismiss)?,
        ),
        AdminCommand::Analytics => print(&commands::analytics(state).await.map_err(dismiss)?),
        AdminCommand::Companies => print(&commands::list_companies(state).await.map_err(dismiss)?),
        AdminCommand::Candidates => print(&commands::list_candidates(state).await.map_err(dismiss)?),
    }
}

/// On a refused change, show the record's real status before failing
fn transition(
    result: Result<jobportal::application::ApplicationDto, jobportal::application::TransitionFailure>,
) -> Result<()> {
    match result {
        Ok(updated) => print(&updated),
        Err(failure) => {
            if let Some(current) = &failure.current {
                print(current)?;
            }
            hint(&failure.error);
            Err(failure.into())
        }
    }
}
