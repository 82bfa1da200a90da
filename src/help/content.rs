use super::{HelpBook, HelpRow};

pub(crate) fn book() -> HelpBook<'static> {
    HelpBook {
        title: "lsn - List with Notes",
        summary: "Display files and directories with descriptions.",
        usage: "lsn [OPTION]... [FILE]...  |  lsn -e <file> <description>",
        options: &[
            HelpRow {
                label: "--help",
                desc: "Display this help, then the listing program's help, and exit.",
            },
            HelpRow {
                label: "-e, --extended-description",
                desc: "Set the description for a file. Takes exactly two arguments: the file name and the text.",
            },
            HelpRow {
                label: "--",
                desc: "Stop recognizing lsn options; later arguments are taken literally.",
            },
        ],
        environment: &[
            HelpRow {
                label: "LSN_STORE",
                desc: "Description file to read and update (default: ./.descriptions).",
            },
            HelpRow {
                label: "LSN_LS",
                desc: "Listing program to run (default: ls). It is called with --color=always -l plus any unrecognized arguments.",
            },
            HelpRow {
                label: "NO_COLOR",
                desc: "Print descriptions without color.",
            },
            HelpRow {
                label: "LSN_LOG",
                desc: "Log filter for diagnostics on stderr, e.g. debug.",
            },
        ],
        examples: &[
            "lsn                              List files and directories with descriptions",
            "lsn -e file.txt 'my description'  Set the description for file.txt",
            "lsn -a --sort=size               Arguments lsn does not know are passed to ls",
        ],
        footer: &[
            "Descriptions are matched by the name shown in the last column of the listing; names containing spaces are not matched.",
        ],
    }
}
