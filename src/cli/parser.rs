use crate::core::notify::Template;
use crate::export::{ExportFormat, ExportTarget};
use crate::models::{AttendanceStatus, NotificationType, ScanType};
use clap::{Parser, Subcommand};

/// Command-line interface definition for rollcall
/// RFID teacher attendance tracking backed by SQLite
#[derive(Parser)]
#[command(
    name = "rollcall",
    version = env!("CARGO_PKG_VERSION"),
    about = "Teacher attendance from RFID scans: schedules, punctuality reports and notifications using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long, help = "Number of rows to show (default: log_limit from config)")]
        limit: Option<usize>,
    },

    /// Manage teachers
    Teacher {
        #[command(subcommand)]
        action: TeacherAction,
    },

    /// Manage classrooms
    Classroom {
        #[command(subcommand)]
        action: ClassroomAction,
    },

    /// Manage weekly schedule slots
    Schedule {
        #[command(subcommand)]
        action: ScheduleAction,
    },

    /// Record an RFID badge scan
    Scan {
        /// Badge identifier read by the scanner
        rfid: String,

        #[arg(long = "room", help = "Classroom id where the scan happened")]
        room: String,

        #[arg(long = "type", value_enum, help = "Scan direction (default: inferred)")]
        scan_type: Option<ScanType>,

        #[arg(long, help = "Scan date (YYYY-MM-DD), for manual entries")]
        date: Option<String>,

        #[arg(long, help = "Scan time (HH:MM or HH:MM:SS), for manual entries")]
        time: Option<String>,
    },

    /// List attendance logs, most recent first
    Logs {
        #[arg(long)]
        teacher: Option<String>,

        #[arg(long)]
        classroom: Option<String>,

        #[arg(long, value_enum)]
        status: Option<AttendanceStatus>,

        #[arg(long, help = "Single day (YYYY-MM-DD)")]
        date: Option<String>,

        #[arg(long, help = "Filter by year/month/day or a custom range")]
        range: Option<String>,

        #[arg(long, help = "Maximum rows (default: 100)")]
        limit: Option<usize>,
    },

    /// Admin attendance report
    Report {
        #[arg(
            long,
            help = "Date range (YYYY, YYYY-MM, YYYY-MM-DD, a:b or 'all'; default: last report_days days)"
        )]
        range: Option<String>,

        #[arg(long)]
        teacher: Option<String>,

        #[arg(long)]
        classroom: Option<String>,

        #[arg(long, help = "Weekly buckets to show (default: admin_report_weeks)")]
        weeks: Option<usize>,

        #[arg(long = "zero-fill", help = "List teachers without classified arrivals too")]
        zero_fill: bool,

        #[arg(long, help = "Print statistics as JSON")]
        json: bool,

        #[arg(
            long,
            value_name = "SECS",
            help = "Re-render whenever the database changes, polling every SECS seconds"
        )]
        watch: Option<u64>,
    },

    /// Teacher view: own statistics, history and today's classes
    Me {
        #[arg(long, help = "Teacher id (default: teacher_id from config)")]
        teacher: Option<String>,

        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        #[arg(long)]
        year: Option<i32>,
    },

    /// Record absences for schedule slots that passed without a check-in
    Sweep {
        #[arg(long, help = "Date range (default: last report_days days)")]
        range: Option<String>,

        #[arg(long = "dry-run", help = "Show the absences without saving them")]
        dry_run: bool,
    },

    /// Send a notification to a teacher
    Notify {
        #[arg(long = "to", help = "Recipient teacher id")]
        to: String,

        #[arg(long, value_enum)]
        template: Option<Template>,

        #[arg(long = "room", help = "Classroom name used by templates")]
        room: Option<String>,

        #[arg(long = "at", help = "Time or date used by templates")]
        at: Option<String>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        message: Option<String>,

        #[arg(long = "type", value_enum)]
        kind: Option<NotificationType>,
    },

    /// List notifications received by a user
    Notifications {
        #[arg(long = "user", help = "User id (default: teacher_id from config)")]
        user: Option<String>,

        #[arg(long = "mark-read")]
        mark_read: bool,
    },

    /// Admin dashboard: totals, today's activity and recent scans
    Dashboard,

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export attendance data
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long = "what", value_enum, default_value = "logs")]
        what: ExportTarget,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum TeacherAction {
    /// Register a teacher and their badge
    Add {
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        rfid: String,

        #[arg(long, help = "Explicit id (default: generated)")]
        id: Option<String>,
    },
    /// List teachers
    List,
    /// Remove a teacher (attendance history is kept)
    Del {
        id: String,

        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ClassroomAction {
    /// Register a classroom
    Add {
        name: String,

        #[arg(long, default_value = "")]
        location: String,

        #[arg(long, help = "Explicit id (default: generated)")]
        id: Option<String>,
    },
    /// List classrooms
    List,
    /// Remove a classroom
    Del {
        id: String,

        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Add a weekly slot
    Add {
        #[arg(long)]
        teacher: String,

        #[arg(long = "room")]
        room: String,

        #[arg(long, help = "Day of week: 0-6 (0 = Sunday) or a day name")]
        day: String,

        #[arg(long, help = "Start time (HH:MM)")]
        start: String,

        #[arg(long, help = "End time (HH:MM)")]
        end: String,

        #[arg(long, help = "Grace period in minutes (default: default_grace_period)")]
        grace: Option<u32>,
    },
    /// List slots, by day and start time
    List {
        #[arg(long)]
        teacher: Option<String>,
    },
    /// Remove a slot
    Del {
        id: String,

        #[arg(long, short = 'y')]
        yes: bool,
    },
}
